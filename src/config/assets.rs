// Static asset configuration
// Immutable once built; shared by every request the middleware handles

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Root-level files that are always servable, whatever the caller configures
pub const DEFAULT_ASSETS: &[&str] = &["favicon.ico", "robots.txt"];

/// Configuration of one middleware installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticConfig {
    root: String,
    allow_list: HashSet<String>,
    wildcard: bool,
    base_dir: Option<PathBuf>,
}

impl StaticConfig {
    /// Build a configuration from a root prefix and extra allow-listed names
    ///
    /// The built-in [`DEFAULT_ASSETS`] are always added to the allow-list.
    ///
    /// # Examples
    /// ```
    /// use static_assets::StaticConfig;
    ///
    /// let cfg = StaticConfig::new("static", ["manifest.json"], false);
    /// assert!(cfg.is_allowed("manifest.json"));
    /// assert!(cfg.is_allowed("robots.txt"));
    /// assert!(!cfg.is_allowed("static/app.css"));
    /// ```
    pub fn new<I, T>(root: impl Into<String>, extras: I, wildcard: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let allow_list = extras
            .into_iter()
            .map(Into::into)
            .chain(DEFAULT_ASSETS.iter().map(|name| (*name).to_string()))
            .collect();

        Self {
            root: root.into(),
            allow_list,
            wildcard,
            base_dir: None,
        }
    }

    /// Resolve locations against `dir` instead of the working directory
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub const fn allow_list(&self) -> &HashSet<String> {
        &self.allow_list
    }

    /// Whether `location` is an allow-listed root-level file
    pub fn is_allowed(&self, location: &str) -> bool {
        self.allow_list.contains(location)
    }

    pub const fn wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}
