// Reporting seam between the phase runner and whatever displays results

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::config::LogOptions;
use crate::core::diagnostics::Diagnostics;
use crate::core::items::TrimmedItems;
use crate::core::trash::TrashEvent;
use crate::error::SweepError;

/// Build pipeline extension points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the build starts
    Before,
    /// Before each incremental rebuild
    Watch,
    /// After assets are emitted
    After,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Before, Phase::Watch, Phase::After];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::Watch => "watch",
            Phase::After => "after",
        }
    }

    /// Name of the host hook the phase is attached to
    pub fn hook_name(&self) -> &'static str {
        match self {
            Phase::Before => "beforeRun",
            Phase::Watch => "watchRun",
            Phase::After => "afterEmit",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" | "beforerun" => Ok(Phase::Before),
            "watch" | "watchrun" => Ok(Phase::Watch),
            "after" | "afteremit" => Ok(Phase::After),
            other => Err(SweepError::config(format!("Unknown phase: {}", other))),
        }
    }
}

/// Where a phase invocation ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    /// No options for this phase
    Skipped,
    /// Planning could not run (bad root, internal pattern error)
    Failed,
    /// Nothing left to remove after filtering
    Empty,
    /// Emulate mode: planned and reported, nothing deleted
    ReportOnly,
    /// The before-remove hook vetoed the deletion
    Cancelled,
    /// Deletion executed (or queued for the trash)
    Done,
}

/// What a phase planned and did, already trimmed for display
#[derive(Debug, Clone)]
pub struct PhaseReport {
    pub phase: Phase,
    pub root: PathBuf,
    pub items: TrimmedItems,
    pub state: PhaseState,
    pub emulate: bool,
    pub to_trash: bool,
    pub log: LogOptions,
}

/// Displays phase results; the console implementation lives in `ui`
pub trait Reporter: Send + Sync {
    fn report(&self, report: &PhaseReport);

    /// Diagnostics that the host context had no collection for
    fn diagnostics(&self, phase: Phase, diagnostics: &Diagnostics, log: LogOptions);

    /// Asynchronous trash result, delivered after the phase has returned
    fn trash_event(&self, phase: Phase, event: &TrashEvent, log: LogOptions);
}
