use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::core::path_safety::{is_safe, to_absolute};

/// Report whether a path would pass the root safety check
pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<String>("path")
        .context("Path argument is required")?;

    let root = match matches.get_one::<String>("root") {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir().context("Cannot determine working directory")?,
    };

    let resolved = to_absolute(&root, path);
    if is_safe(&root, &resolved) {
        println!("{} {}", "safe:".green().bold(), resolved.display());
    } else {
        println!(
            "{} {} {}",
            "unsafe:".red().bold(),
            resolved.display(),
            format!("(root is {})", root.display()).dimmed()
        );
    }

    Ok(())
}
