// Removal set: the directories and files one phase is about to delete

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Two disjoint, duplicate-free lists of absolute paths.
///
/// Once reduced, no entry lies below one of the `directories`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Items {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl Items {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    /// Add a directory unless it is already present
    pub fn push_directory(&mut self, path: PathBuf) -> bool {
        if self.directories.contains(&path) {
            return false;
        }
        self.directories.push(path);
        true
    }

    /// Add a file unless it is already present
    pub fn push_file(&mut self, path: PathBuf) -> bool {
        if self.files.contains(&path) {
            return false;
        }
        self.files.push(path);
        true
    }

    /// Directories first, then files
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.directories.iter().chain(self.files.iter())
    }

    /// Copy of the set with `root` stripped from every path, for display only.
    ///
    /// Paths outside the root are kept absolute.
    pub fn trimmed(&self, root: &Path) -> TrimmedItems {
        TrimmedItems {
            directories: self.directories.iter().map(|p| trim_root(root, p)).collect(),
            files: self.files.iter().map(|p| trim_root(root, p)).collect(),
        }
    }

    /// Same contents regardless of order
    pub fn same_set(&self, other: &Items) -> bool {
        fn as_set(paths: &[PathBuf]) -> HashSet<&PathBuf> {
            paths.iter().collect()
        }
        as_set(&self.directories) == as_set(&other.directories)
            && as_set(&self.files) == as_set(&other.files)
    }
}

/// Root-relative view of an [`Items`] set handed to reporters
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrimmedItems {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

impl TrimmedItems {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}

fn trim_root(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.to_string_lossy().to_string(),
        _ => path.to_string_lossy().to_string(),
    }
}
