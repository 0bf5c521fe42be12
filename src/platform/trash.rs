// Platform trash (Recycle Bin / freedesktop Trash / macOS Trash)
use std::path::Path;

use crate::core::trash::Trash;
use crate::error::{Result, SweepError};

/// Trash backed by the operating system's recycle bin
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl Trash for SystemTrash {
    fn move_to_trash(&self, path: &Path) -> Result<()> {
        trash::delete(path).map_err(|e| {
            log::error!("Trash operation failed for {}: {}", path.display(), e);
            SweepError::trash(path, e.to_string())
        })?;

        log::debug!("Moved to trash: {}", path.display());
        Ok(())
    }
}
