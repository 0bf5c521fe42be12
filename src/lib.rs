// buildsweep library - public API

// Re-export error types
pub mod error;
pub use error::{Result, SweepError};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{Phase, PhaseOptions, PluginOptions, RemovalRequest, SweepPlugin, TestEntry};

// Initialize logging
pub fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}
