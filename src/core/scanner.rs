//! Predicate-driven directory scanner
//!
//! Expands a test folder into the files that should be removed. Directories
//! are walked with an explicit stack and symbolic links are never descended
//! into, so link cycles cannot trap the walk.
//!
//! # Examples
//!
//! ```no_run
//! use buildsweep::core::diagnostics::Diagnostics;
//! use buildsweep::core::scanner::DirectoryScanner;
//! use std::path::Path;
//!
//! let mut diagnostics = Diagnostics::new();
//! let scanner = DirectoryScanner::new(Path::new("/project/dist"), true);
//! let maps = scanner.scan(
//!     |path| path.extension().map_or(false, |ext| ext == "map"),
//!     &mut diagnostics,
//! );
//! println!("{} source maps", maps.len());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::diagnostics::Diagnostics;

/// Scanner for one test folder
pub struct DirectoryScanner {
    folder: PathBuf,
    recursive: bool,
}

impl DirectoryScanner {
    pub fn new(folder: &Path, recursive: bool) -> Self {
        log::debug!("Creating DirectoryScanner for {:?} (recursive: {})", folder, recursive);
        Self {
            folder: folder.to_path_buf(),
            recursive,
        }
    }

    /// Check that the folder exists and is a directory.
    ///
    /// A missing folder or a file in its place is a warning, never a failure.
    pub fn validate(&self, diagnostics: &mut Diagnostics) -> bool {
        match fs::metadata(&self.folder) {
            Ok(metadata) if metadata.is_dir() => true,
            Ok(_) => {
                diagnostics.warn(format!(
                    "Test folder is not a directory, skipped: {}",
                    self.folder.display()
                ));
                false
            }
            Err(e) => {
                diagnostics.warn(format!(
                    "Test folder cannot be read, skipped: {} ({})",
                    self.folder.display(),
                    e
                ));
                false
            }
        }
    }

    /// Collect every file under the folder accepted by `predicate`.
    ///
    /// Subdirectories are only visited when the scanner is recursive. Entries
    /// whose type cannot be determined are skipped with a warning.
    pub fn scan<F>(&self, predicate: F, diagnostics: &mut Diagnostics) -> Vec<PathBuf>
    where
        F: Fn(&Path) -> bool,
    {
        let mut matches = Vec::new();

        if !self.validate(diagnostics) {
            return matches;
        }

        let mut pending = vec![self.folder.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir) {
                Ok(entries) => {
                    readable_entries(&dir, entries.map(|e| e.map(|e| e.path())), diagnostics)
                }
                Err(e) => {
                    diagnostics.warn(format!("Cannot read directory {}: {}", dir.display(), e));
                    continue;
                }
            };
            entries.sort();

            let mut subdirs = Vec::new();

            for path in entries {
                match EntryKind::of(&path) {
                    Ok(EntryKind::File) => {
                        if predicate(&path) {
                            matches.push(path);
                        }
                    }
                    Ok(EntryKind::Directory) => {
                        if self.recursive {
                            subdirs.push(path);
                        }
                    }
                    Ok(EntryKind::LinkedDirectory) => {
                        log::debug!("Not following directory link: {}", path.display());
                    }
                    Ok(EntryKind::Other) => {
                        log::debug!("Skipping special file: {}", path.display());
                    }
                    Err(e) => {
                        diagnostics.warn(format!(
                            "Cannot determine type of {}, skipped: {}",
                            path.display(),
                            e
                        ));
                    }
                }
            }

            // Reverse so subdirectories are visited in name order
            pending.extend(subdirs.into_iter().rev());
        }

        matches
    }
}

/// Paths of the entries that could be read; the others become warnings
fn readable_entries<I>(dir: &Path, entries: I, diagnostics: &mut Diagnostics) -> Vec<PathBuf>
where
    I: Iterator<Item = io::Result<PathBuf>>,
{
    entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                diagnostics.warn(format!("Cannot read an entry of {}, skipped: {}", dir.display(), e));
                None
            }
        })
        .collect()
}

enum EntryKind {
    File,
    Directory,
    LinkedDirectory,
    Other,
}

impl EntryKind {
    fn of(path: &Path) -> io::Result<Self> {
        let metadata = fs::symlink_metadata(path)?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            // Broken links surface as an error here
            let target = fs::metadata(path)?;
            return Ok(if target.is_file() {
                EntryKind::File
            } else if target.is_dir() {
                EntryKind::LinkedDirectory
            } else {
                EntryKind::Other
            });
        }

        Ok(if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        })
    }
}
