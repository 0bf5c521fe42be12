// Phase options, both programmatic and loaded from a JSON config file

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::items::TrimmedItems;
use crate::core::path_safety::to_absolute;
use crate::core::request::{RemovalRequest, TestEntry};
use crate::error::{Result, SweepError};

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "buildsweep.json";

/// Called with the planned set before anything is deleted; `true` cancels
pub type BeforeRemoveHook = Arc<dyn Fn(&TrimmedItems) -> bool + Send + Sync>;

/// Called with the absolute paths that were permanently removed
pub type AfterRemoveHook = Arc<dyn Fn(&[PathBuf]) + Send + Sync>;

/// Which messages a phase reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogOptions {
    pub log: bool,
    pub log_warning: bool,
    pub log_error: bool,
    pub log_debug: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log: true,
            log_warning: true,
            log_error: true,
            log_debug: false,
        }
    }
}

/// Options for a single phase (before, watch or after)
#[derive(Clone, Default)]
pub struct PhaseOptions {
    /// Base directory; the working directory when unset
    pub root: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub test: Vec<TestEntry>,
    pub allow_root_and_outside: bool,
    pub emulate: bool,
    pub trash: bool,
    pub log: LogOptions,
    /// Watch phase only: use the `before` options on the first build
    pub before_for_first_build: bool,
    pub before_remove: Option<BeforeRemoveHook>,
    pub after_remove: Option<AfterRemoveHook>,
}

impl PhaseOptions {
    /// Root with the working-directory default applied
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(match &self.root {
            Some(root) => to_absolute(&cwd, &root.to_string_lossy()),
            None => cwd,
        })
    }

    /// Fresh request for one invocation of this phase
    pub fn to_request(&self) -> Result<RemovalRequest> {
        Ok(RemovalRequest {
            root: self.resolve_root()?,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            test: self.test.clone(),
            allow_root_and_outside: self.allow_root_and_outside,
            emulate: self.emulate,
            to_trash: self.trash,
        })
    }
}

/// Options for every phase the plugin handles
#[derive(Clone, Default)]
pub struct PluginOptions {
    pub before: Option<PhaseOptions>,
    pub watch: Option<PhaseOptions>,
    pub after: Option<PhaseOptions>,
}

impl PluginOptions {
    /// At least one phase has to be configured
    pub fn validate(&self) -> Result<()> {
        if self.before.is_none() && self.watch.is_none() && self.after.is_none() {
            return Err(SweepError::config(
                "No phase configured: set at least one of before, watch or after",
            ));
        }
        Ok(())
    }

    /// Load options from a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&data)?;
        file.into_options()
    }
}

/// On-disk shape of the config file
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub before: Option<PhaseFile>,
    #[serde(default)]
    pub watch: Option<PhaseFile>,
    #[serde(default)]
    pub after: Option<PhaseFile>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseFile {
    pub root: Option<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub test: Vec<TestFile>,
    pub allow_root_and_outside: bool,
    pub emulate: bool,
    #[serde(alias = "toTrash")]
    pub trash: bool,
    #[serde(flatten)]
    pub log: LogOptions,
    pub before_for_first_build: bool,
}

/// A test folder as written in the config file.
///
/// Files match when the absolute path matches `pattern` (if given) and ends
/// with one of `extensions` (if given).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestFile {
    pub folder: String,
    pub pattern: Option<String>,
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl ConfigFile {
    pub fn into_options(self) -> Result<PluginOptions> {
        let options = PluginOptions {
            before: self.before.map(PhaseFile::into_options).transpose()?,
            watch: self.watch.map(PhaseFile::into_options).transpose()?,
            after: self.after.map(PhaseFile::into_options).transpose()?,
        };
        options.validate()?;
        Ok(options)
    }
}

impl PhaseFile {
    pub fn into_options(self) -> Result<PhaseOptions> {
        let test = self
            .test
            .into_iter()
            .map(TestFile::into_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(PhaseOptions {
            root: self.root.map(PathBuf::from),
            include: self.include,
            exclude: self.exclude,
            test,
            allow_root_and_outside: self.allow_root_and_outside,
            emulate: self.emulate,
            trash: self.trash,
            log: self.log,
            before_for_first_build: self.before_for_first_build,
            before_remove: None,
            after_remove: None,
        })
    }
}

impl TestFile {
    pub fn into_entry(self) -> Result<TestEntry> {
        if self.folder.trim().is_empty() {
            return Err(SweepError::invalid_path("Test folder must not be empty"));
        }
        if self.pattern.is_none() && self.extensions.is_empty() {
            return Err(SweepError::config(format!(
                "Test folder '{}' needs a pattern or a list of extensions",
                self.folder
            )));
        }

        let pattern = match &self.pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|e| {
                SweepError::config(format!("Invalid pattern for test folder '{}': {}", self.folder, e))
            })?),
            None => None,
        };
        let extensions = self.extensions;

        Ok(TestEntry::new(
            self.folder,
            move |path: &Path| {
                let path = path.to_string_lossy();
                let pattern_ok = pattern.as_ref().map_or(true, |re| re.is_match(&path));
                let extension_ok =
                    extensions.is_empty() || extensions.iter().any(|ext| path.ends_with(ext.as_str()));
                pattern_ok && extension_ok
            },
            self.recursive,
        ))
    }
}
