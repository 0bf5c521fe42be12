//! Console reporter
//!
//! Prints the root-trimmed removal set, leftover diagnostics and trash
//! results. Each phase's log switches decide what is shown.

use colored::Colorize;

use crate::core::config::LogOptions;
use crate::core::diagnostics::Diagnostics;
use crate::core::items::TrimmedItems;
use crate::core::report::{Phase, PhaseReport, PhaseState, Reporter};
use crate::core::trash::TrashEvent;
use crate::ui::messages;

/// Reporter writing to stdout/stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn heading(report: &PhaseReport) -> String {
        let prefix = format!("buildsweep ({})", report.phase);
        match report.state {
            PhaseState::ReportOnly => {
                format!("{}: the following items would be removed (emulate mode)", prefix)
            }
            PhaseState::Cancelled => format!("{}: removal cancelled, planned items", prefix),
            PhaseState::Done if report.to_trash => format!("{}: moving to trash", prefix),
            PhaseState::Done => format!("{}: removed", prefix),
            PhaseState::Skipped | PhaseState::Failed | PhaseState::Empty => {
                format!("{}: nothing removed", prefix)
            }
        }
    }
}

/// Render the item list, directories first
pub fn format_items(items: &TrimmedItems) -> Vec<String> {
    let dirs = items
        .directories
        .iter()
        .map(|dir| format!("  {} {}", "dir ".blue().bold(), dir));
    let files = items
        .files
        .iter()
        .map(|file| format!("  {} {}", "file".white(), file));
    dirs.chain(files).collect()
}

impl Reporter for ConsoleReporter {
    fn report(&self, report: &PhaseReport) {
        if !report.log.log || report.items.is_empty() {
            return;
        }

        let heading = Self::heading(report);
        match report.state {
            PhaseState::Done => messages::success(&heading),
            PhaseState::ReportOnly => messages::info(&heading),
            _ => messages::dimmed(&heading),
        }
        for line in format_items(&report.items) {
            println!("{}", line);
        }
        if report.log.log_debug {
            messages::dimmed(&format!("root: {}", report.root.display()));
        }
    }

    fn diagnostics(&self, phase: Phase, diagnostics: &Diagnostics, log: LogOptions) {
        if log.log_warning {
            for warning in &diagnostics.warnings {
                messages::warn(&format!("buildsweep ({}): {}", phase, warning));
            }
        }
        if log.log_error {
            for error in &diagnostics.errors {
                messages::error(&format!("buildsweep ({}): {}", phase, error));
            }
        }
    }

    fn trash_event(&self, phase: Phase, event: &TrashEvent, log: LogOptions) {
        match event {
            TrashEvent::Moved(path) => {
                if log.log {
                    messages::bold(&format!("buildsweep ({}): moved to trash {}", phase, path.display()));
                }
            }
            TrashEvent::Failed { path, message } => {
                if log.log_error {
                    messages::error(&format!(
                        "buildsweep ({}): cannot move {} to trash: {}",
                        phase,
                        path.display(),
                        message
                    ));
                }
            }
        }
    }
}
