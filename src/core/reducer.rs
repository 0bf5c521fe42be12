// Redundancy reduction: drop entries already covered by a directory removal

use crate::core::items::Items;
use crate::core::path_safety::AncestorMatcher;
use crate::error::Result;

/// Remove every entry that lies below a directory of the same set.
///
/// Directories are pruned first (all pairs), then files are checked
/// against the surviving directories only.
pub fn reduce(items: Items) -> Result<Items> {
    let Items { directories, files } = items;

    let matchers = directories
        .iter()
        .map(|dir| AncestorMatcher::new(dir))
        .collect::<Result<Vec<_>>>()?;

    let mut kept_directories = Vec::with_capacity(directories.len());
    let mut kept_matchers = Vec::with_capacity(matchers.len());

    for (index, dir) in directories.iter().enumerate() {
        let covered = matchers
            .iter()
            .enumerate()
            .any(|(other, matcher)| other != index && matcher.contains(dir));

        if covered {
            log::debug!("Dropping {} (covered by an ancestor directory)", dir.display());
        } else if !kept_directories.contains(dir) {
            kept_directories.push(dir.clone());
            kept_matchers.push(&matchers[index]);
        }
    }

    let mut kept_files = Vec::with_capacity(files.len());
    for file in files {
        if kept_matchers.iter().any(|matcher| matcher.contains(&file)) {
            log::debug!("Dropping {} (covered by a directory)", file.display());
        } else if !kept_files.contains(&file) {
            kept_files.push(file);
        }
    }

    Ok(Items {
        directories: kept_directories,
        files: kept_files,
    })
}
