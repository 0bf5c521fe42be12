// Core business logic module

pub mod config;
pub mod diagnostics;
pub mod executor;
pub mod items;
pub mod path_safety;
pub mod planner;
pub mod plugin;
pub mod reducer;
pub mod report;
pub mod request;
pub mod scanner;
pub mod trash;

// Re-export commonly used items
pub use config::{LogOptions, PhaseOptions, PluginOptions};
pub use diagnostics::Diagnostics;
pub use items::{Items, TrimmedItems};
pub use planner::plan;
pub use plugin::{BuildContext, BuildHooks, CollectingContext, NoContext, PhaseOutcome, SweepPlugin};
pub use report::{Phase, PhaseReport, PhaseState, Reporter};
pub use request::{RemovalRequest, TestEntry};
pub use scanner::DirectoryScanner;
pub use self::trash::{Trash, TrashEvent, TrashQueue};
