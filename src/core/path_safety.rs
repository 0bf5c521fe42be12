//! Path resolution and root containment checks
//!
//! Every path that ends up in a removal set passes through this module.
//! Forward and backward slashes are both accepted as separators regardless
//! of the host platform, and drive prefixes (`C:`) are compared explicitly
//! before any containment check runs.
//!
//! # Examples
//!
//! ```
//! use buildsweep::core::path_safety::{is_safe, to_absolute};
//! use std::path::Path;
//!
//! let root = Path::new("/project");
//! let dist = to_absolute(root, "dist\\js");
//! assert!(is_safe(root, &dist));
//! assert!(!is_safe(root, Path::new("/project2")));
//! assert!(!is_safe(root, root));
//! ```

use regex::Regex;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::error::Result;

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Split a path string into its drive prefix (`C:`) and the remainder.
///
/// Drive letters are upper-cased so `c:/x` and `C:\x` land on the same volume.
fn split_volume(path: &str) -> (Option<String>, &str) {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic() => {
            (Some(format!("{}:", letter.to_ascii_uppercase())), &path[2..])
        }
        _ => (None, path),
    }
}

/// Volume a path lives on, `None` for paths without a drive prefix
pub fn volume_of(path: &str) -> Option<String> {
    split_volume(path).0
}

/// Whether the string denotes an absolute path (`/x`, `\x`, `C:\x`, `C:/x`)
pub fn is_absolute(path: &str) -> bool {
    let (_, rest) = split_volume(path);
    rest.starts_with(is_separator)
}

/// Collapse `.` and `..` segments and unify separators.
///
/// `..` never climbs above the root of an absolute path. The result uses the
/// platform's main separator.
pub fn normalize(path: &str) -> String {
    let (volume, rest) = split_volume(path);
    let rooted = rest.starts_with(is_separator);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut normalized = volume.unwrap_or_default();
    if rooted {
        normalized.push(MAIN_SEPARATOR);
    }
    normalized.push_str(&segments.join(&MAIN_SEPARATOR.to_string()));

    if normalized.is_empty() {
        normalized.push('.');
    }
    normalized
}

/// Resolve `path` against `root`.
///
/// Absolute paths are kept as they are apart from separator and dot-segment
/// normalization; relative ones are joined onto `root` first.
pub fn to_absolute(root: &Path, path: &str) -> PathBuf {
    if is_absolute(path) {
        return PathBuf::from(normalize(path));
    }

    let joined = format!("{}{}{}", root.to_string_lossy(), MAIN_SEPARATOR, path);
    PathBuf::from(normalize(&joined))
}

/// Matches paths that are strict descendants of one ancestor.
///
/// The ancestor is escaped before it is compiled, so parentheses, brackets,
/// `+`, `$` and friends in directory names are matched literally. A separator
/// must follow the ancestor, which keeps `/a/b` from claiming `/a/bc`.
#[derive(Debug, Clone)]
pub struct AncestorMatcher {
    pattern: Regex,
}

impl AncestorMatcher {
    pub fn new(ancestor: &Path) -> Result<Self> {
        let normalized = normalize(&ancestor.to_string_lossy());
        let trimmed = normalized.trim_end_matches(is_separator);
        // (?s): any byte after the separator counts, newlines included
        let pattern = Regex::new(&format!(r"(?s)^{}[\\/].", regex::escape(trimmed)))?;

        Ok(Self { pattern })
    }

    /// True when `candidate` lies strictly below the ancestor
    pub fn contains(&self, candidate: &Path) -> bool {
        let candidate = normalize(&candidate.to_string_lossy());
        self.pattern.is_match(&candidate)
    }
}

/// Root containment check, compiled once and reused for every candidate
#[derive(Debug, Clone)]
pub struct RootGuard {
    root: String,
    volume: Option<String>,
    descendants: AncestorMatcher,
}

impl RootGuard {
    pub fn new(root: &Path) -> Result<Self> {
        let normalized = normalize(&root.to_string_lossy());

        Ok(Self {
            volume: volume_of(&normalized),
            descendants: AncestorMatcher::new(Path::new(&normalized))?,
            root: normalized.trim_end_matches(is_separator).to_string(),
        })
    }

    /// Whether `path` may be removed: a strict descendant on the same volume
    pub fn is_safe(&self, path: &Path) -> bool {
        let path_str = normalize(&path.to_string_lossy());

        if self.volume != volume_of(&path_str) {
            return false;
        }
        if self.is_root(&path_str) {
            return false;
        }
        self.descendants.contains(Path::new(&path_str))
    }

    /// Whether `path` is the root itself or lies below it
    pub fn covers(&self, path: &Path) -> bool {
        let path_str = normalize(&path.to_string_lossy());
        (self.volume == volume_of(&path_str) && self.is_root(&path_str)) || self.is_safe(path)
    }

    fn is_root(&self, normalized: &str) -> bool {
        self.root == normalized.trim_end_matches(is_separator)
    }
}

/// Whether `path` may be removed under `root`.
///
/// Returns `false` for the root itself, for anything on another volume and
/// for anything outside the root. Only strict descendants are safe.
pub fn is_safe(root: &Path, path: &Path) -> bool {
    match RootGuard::new(root) {
        Ok(guard) => guard.is_safe(path),
        Err(e) => {
            log::error!("Cannot build containment check for {}: {}", root.display(), e);
            false
        }
    }
}
