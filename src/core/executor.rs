//! Removal executor
//!
//! Deletes a reduced [`Items`] set either permanently or through the trash.
//!
//! Permanent deletion is best effort: a failure on one file or directory is
//! recorded and the walk carries on with its siblings. Directory trees are
//! taken apart depth-first with an explicit stack, and symbolic links are
//! unlinked rather than followed.
//!
//! # Examples
//!
//! ```no_run
//! use buildsweep::core::diagnostics::Diagnostics;
//! use buildsweep::core::executor::{execute, Method};
//! use buildsweep::core::items::Items;
//! use std::path::PathBuf;
//!
//! let mut items = Items::new();
//! items.push_directory(PathBuf::from("/project/dist"));
//!
//! let mut diagnostics = Diagnostics::new();
//! let outcome = execute(&items, Method::Permanent, &mut diagnostics);
//! println!("removed {} entries", outcome.removed.len());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::diagnostics::Diagnostics;
use crate::core::items::Items;
use crate::core::trash::{TrashCallback, TrashQueue};

/// Deepest directory nesting the permanent walk descends into
const MAX_DEPTH: usize = 4096;

/// How the removal set is deleted
pub enum Method<'a> {
    Permanent,
    Trash {
        queue: &'a TrashQueue,
        on_event: TrashCallback,
    },
}

/// What the executor did with each top-level entry
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Entries permanently removed, including every descendant
    pub removed: Vec<PathBuf>,
    /// Entries handed to the trash; their results arrive asynchronously
    pub queued: Vec<PathBuf>,
}

/// Delete `items` with the given method
pub fn execute(items: &Items, method: Method<'_>, diagnostics: &mut Diagnostics) -> RemovalOutcome {
    let mut outcome = RemovalOutcome::default();

    match method {
        Method::Permanent => {
            for dir in &items.directories {
                if remove_directory(dir, diagnostics) {
                    outcome.removed.push(dir.clone());
                }
            }
            for file in &items.files {
                if remove_file(file, diagnostics) {
                    outcome.removed.push(file.clone());
                }
            }
        }
        Method::Trash { queue, on_event } => {
            for path in items.iter() {
                queue.submit(path.clone(), on_event.clone());
                outcome.queued.push(path.clone());
            }
        }
    }

    outcome
}

fn remove_file(path: &Path, diagnostics: &mut Diagnostics) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed file: {}", path.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            diagnostics.warn(format!("File no longer exists: {}", path.display()));
            false
        }
        Err(e) => {
            diagnostics.error(format!("Cannot remove file {}: {}", path.display(), e));
            false
        }
    }
}

/// Remove a directory and everything below it.
///
/// Returns `true` when the directory itself is gone at the end.
fn remove_directory(root: &Path, diagnostics: &mut Diagnostics) -> bool {
    match fs::symlink_metadata(root) {
        Ok(metadata) if metadata.is_dir() => {}
        Ok(_) => {
            diagnostics.warn(format!("No longer a directory, skipped: {}", root.display()));
            return false;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            diagnostics.warn(format!("Directory no longer exists: {}", root.display()));
            return false;
        }
        Err(e) => {
            diagnostics.error(format!("Cannot stat directory {}: {}", root.display(), e));
            return false;
        }
    }

    // (path, depth, children already handled)
    let mut stack: Vec<(PathBuf, usize, bool)> = vec![(root.to_path_buf(), 0, false)];
    let mut root_removed = false;

    while let Some((dir, depth, expanded)) = stack.pop() {
        if expanded {
            match fs::remove_dir(&dir) {
                Ok(()) => {
                    log::debug!("Removed directory: {}", dir.display());
                    root_removed = dir == root;
                }
                Err(e) => {
                    diagnostics.error(format!("Cannot remove directory {}: {}", dir.display(), e));
                }
            }
            continue;
        }

        stack.push((dir.clone(), depth, true));

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                diagnostics.error(format!("Cannot read directory {}: {}", dir.display(), e));
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    diagnostics.error(format!("Cannot read entry in {}: {}", dir.display(), e));
                    continue;
                }
            };
            let path = entry.path();

            // file_type() does not follow links
            match entry.file_type() {
                Ok(file_type) if file_type.is_dir() => {
                    if depth + 1 > MAX_DEPTH {
                        diagnostics.error(format!(
                            "Directory nesting too deep, not removed: {}",
                            path.display()
                        ));
                    } else {
                        stack.push((path, depth + 1, false));
                    }
                }
                Ok(_) => {
                    remove_file(&path, diagnostics);
                }
                Err(e) => {
                    diagnostics.error(format!("Cannot determine type of {}: {}", path.display(), e));
                }
            }
        }
    }

    root_removed
}
