use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use buildsweep::commands;

fn phase_arg() -> Arg {
    Arg::new("phase")
        .help("Phase to run: before, watch or after")
        .required(true)
        .value_parser(["before", "watch", "after"])
        .index(1)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Config file (defaults to ./buildsweep.json)")
}

fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .value_name("DIR")
        .help("Override the root directory of every phase")
}

fn main() -> Result<()> {
    let matches = Command::new("buildsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Remove files and directories before, during and after a build")
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .help("Show debug output")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("run")
                .about("Run one phase from the config file")
                .arg(phase_arg())
                .arg(config_arg())
                .arg(root_arg())
                .arg(
                    Arg::new("emulate")
                        .long("emulate")
                        .help("Show what would be removed without removing anything")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("trash")
                        .long("trash")
                        .help("Move items to the trash instead of deleting them")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Show what a phase would remove (same as run --emulate)")
                .arg(phase_arg())
                .arg(config_arg())
                .arg(root_arg())
                .arg(
                    Arg::new("trash")
                        .long("trash")
                        .hide(true)
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("emulate")
                        .long("emulate")
                        .hide(true)
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check whether a path passes the root safety check")
                .arg(
                    Arg::new("path")
                        .help("Path to check, relative to the root")
                        .required(true)
                        .index(1),
                )
                .arg(root_arg()),
        )
        .get_matches();

    buildsweep::init_logging(matches.get_flag("debug"));

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches, false)?,
        Some(("plan", sub_matches)) => commands::run(sub_matches, true)?,
        Some(("check", sub_matches)) => commands::check(sub_matches)?,
        _ => {
            println!("Welcome to buildsweep!");
            println!("Use 'buildsweep --help' for more information.");
        }
    }

    Ok(())
}
