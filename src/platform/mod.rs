// Platform-specific code module

pub mod trash;

// Re-exports for cleaner imports
pub use self::trash::SystemTrash;
