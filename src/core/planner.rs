//! Removal set builder
//!
//! Turns a [`RemovalRequest`] into a reduced [`Items`] set:
//!
//! 1. `include` and `exclude` are resolved against the root.
//! 2. Every test folder is scanned and its matches appended to `include`.
//! 3. Each candidate is filtered by `exclude`, by the root safety check,
//!    by existence and by type, then classified as file or directory.
//! 4. Entries covered by another directory are pruned.
//!
//! Nothing here touches the filesystem beyond reading metadata.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::diagnostics::Diagnostics;
use crate::core::items::Items;
use crate::core::path_safety::{to_absolute, RootGuard};
use crate::core::reducer::reduce;
use crate::core::request::RemovalRequest;
use crate::core::scanner::DirectoryScanner;
use crate::error::Result;

/// Build the reduced removal set for `request`.
///
/// Skipped candidates never abort planning; they show up in `diagnostics`.
pub fn plan(request: &RemovalRequest, diagnostics: &mut Diagnostics) -> Result<Items> {
    let root = &request.root;
    let guard = RootGuard::new(root)?;

    if !root.is_dir() {
        diagnostics.warn(format!(
            "Root is not an existing directory: {}",
            root.display()
        ));
    }

    let exclude: HashSet<PathBuf> = request
        .exclude
        .iter()
        .map(|path| to_absolute(root, path))
        .collect();

    let mut candidates: Vec<PathBuf> = request
        .include
        .iter()
        .map(|path| to_absolute(root, path))
        .collect();

    for entry in &request.test {
        let folder = to_absolute(root, &entry.folder);

        // The root itself may be scanned; what it yields is checked per file below
        if !request.allow_root_and_outside && !guard.covers(&folder) {
            diagnostics.warn(format!(
                "Test folder is outside the root, skipped: {}",
                folder.display()
            ));
            continue;
        }

        let found = DirectoryScanner::new(&folder, entry.recursive)
            .scan(|path| entry.matches(path), diagnostics);
        log::debug!("Test folder {} produced {} candidates", folder.display(), found.len());
        candidates.extend(found);
    }

    let mut items = Items::new();

    for path in candidates {
        if exclude.contains(&path) {
            log::debug!("Excluded: {}", path.display());
            continue;
        }

        if !request.allow_root_and_outside && !guard.is_safe(&path) {
            diagnostics.warn(format!(
                "Path is outside the root or is the root itself, skipped: {}",
                path.display()
            ));
            continue;
        }

        // Links are classified by the link itself so removal never follows them
        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Does not exist: {}", path.display());
                continue;
            }
            Err(e) => {
                diagnostics.warn(format!("Cannot stat {}, skipped: {}", path.display(), e));
                continue;
            }
        };

        let file_type = metadata.file_type();
        if file_type.is_dir() {
            items.push_directory(path);
        } else if file_type.is_file() || file_type.is_symlink() {
            items.push_file(path);
        } else {
            diagnostics.warn(format!(
                "Path is neither a file nor a directory, skipped: {}",
                path.display()
            ));
        }
    }

    reduce(items)
}
