// Declarative removal request handed to the planner

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Decides whether a scanned file (absolute path) should be removed
pub type Predicate = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// A folder to scan, with the predicate applied to every file found
#[derive(Clone)]
pub struct TestEntry {
    pub folder: String,
    pub predicate: Predicate,
    pub recursive: bool,
}

impl TestEntry {
    pub fn new<S, F>(folder: S, predicate: F, recursive: bool) -> Self
    where
        S: Into<String>,
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Self {
            folder: folder.into(),
            predicate: Arc::new(predicate),
            recursive,
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        (self.predicate)(path)
    }
}

impl fmt::Debug for TestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEntry")
            .field("folder", &self.folder)
            .field("recursive", &self.recursive)
            .finish_non_exhaustive()
    }
}

/// Everything the planner needs for one phase.
///
/// Built fresh for every invocation; `root` is expected to be an existing
/// directory when the request is evaluated.
#[derive(Debug, Clone)]
pub struct RemovalRequest {
    pub root: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub test: Vec<TestEntry>,
    pub allow_root_and_outside: bool,
    pub emulate: bool,
    pub to_trash: bool,
}

impl RemovalRequest {
    /// Empty request rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            test: Vec::new(),
            allow_root_and_outside: false,
            emulate: false,
            to_trash: false,
        }
    }

    pub fn include<S: Into<String>>(mut self, path: S) -> Self {
        self.include.push(path.into());
        self
    }

    pub fn exclude<S: Into<String>>(mut self, path: S) -> Self {
        self.exclude.push(path.into());
        self
    }

    pub fn test(mut self, entry: TestEntry) -> Self {
        self.test.push(entry);
        self
    }

    pub fn allow_root_and_outside(mut self, allow: bool) -> Self {
        self.allow_root_and_outside = allow;
        self
    }

    pub fn emulate(mut self, emulate: bool) -> Self {
        self.emulate = emulate;
        self
    }

    pub fn to_trash(mut self, to_trash: bool) -> Self {
        self.to_trash = to_trash;
        self
    }
}
