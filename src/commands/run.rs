use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::core::config::{PhaseOptions, PluginOptions, DEFAULT_CONFIG_FILE};
use crate::core::plugin::{NoContext, SweepPlugin};
use crate::core::report::{Phase, PhaseState};
use crate::ui::messages;

/// Command-line overrides applied to every configured phase
#[derive(Debug, Default)]
struct Overrides {
    root: Option<PathBuf>,
    emulate: bool,
    trash: bool,
}

impl Overrides {
    fn apply(&self, phase: &mut PhaseOptions) {
        if let Some(root) = &self.root {
            phase.root = Some(root.clone());
        }
        phase.emulate |= self.emulate;
        phase.trash |= self.trash;
    }
}

/// Run one phase from the config file.
///
/// `force_emulate` is set by the `plan` subcommand.
pub fn execute(matches: &clap::ArgMatches, force_emulate: bool) -> Result<()> {
    let phase: Phase = matches
        .get_one::<String>("phase")
        .context("Phase argument is required")?
        .parse()?;

    let config_path = matches
        .get_one::<String>("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut options = PluginOptions::load(&config_path)
        .with_context(|| format!("Failed to load config file: {:?}", config_path))?;

    let overrides = Overrides {
        root: matches.get_one::<String>("root").map(PathBuf::from),
        emulate: force_emulate || matches.get_flag("emulate"),
        trash: matches.get_flag("trash"),
    };
    for phase_options in [&mut options.before, &mut options.watch, &mut options.after]
        .into_iter()
        .flatten()
    {
        overrides.apply(phase_options);
    }

    if overrides.emulate {
        println!("{}", "EMULATE MODE - No files will be deleted".yellow().bold());
        println!();
    }

    let plugin = SweepPlugin::new(options)?;
    let outcome = plugin.handle(
        phase,
        &mut NoContext,
        Box::new(move || log::debug!("Phase {} signalled completion", phase)),
    );

    // The CLI is the last thing running, so wait for the trash here
    if plugin.pending_trash() > 0 {
        messages::dimmed("Waiting for trash operations to finish...");
        plugin.settle();
    }

    match outcome.state {
        PhaseState::Skipped => {
            messages::warn(&format!("Phase '{}' is not configured in {:?}", phase, config_path));
        }
        PhaseState::Done if !outcome.removal.removed.is_empty() => {
            println!();
            println!(
                "{} {}",
                "Removed:".green().bold(),
                format!("{} item(s)", outcome.removal.removed.len()).yellow().bold()
            );
        }
        _ => {}
    }

    if !outcome.diagnostics.errors.is_empty() {
        anyhow::bail!(
            "{} problem(s) while running phase '{}'",
            outcome.diagnostics.errors.len(),
            phase
        );
    }

    Ok(())
}
