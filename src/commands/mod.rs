// Command handlers module
pub mod check;
pub mod run;

// Re-exports for cleaner imports
pub use check::execute as check;
pub use run::execute as run;
