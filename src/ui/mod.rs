// UI and formatting module

pub mod console;
pub mod messages;

// Re-export commonly used items for cleaner imports
pub use console::{format_items, ConsoleReporter};
