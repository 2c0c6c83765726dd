//! Mapping logical document paths onto files inside the target tree.
//!
//! Documents name files relative to the application's own source root
//! (`src/...`). Upstream nests that source root under a package prefix; the
//! layout below is the single place that assumption lives.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageLayout {
    /// Two-level directory the application's sources live under.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// First path segment that marks a source-root relative path.
    #[serde(default = "default_source_marker")]
    pub source_marker: String,
}

fn default_prefix() -> String {
    "packages/app".to_string()
}

fn default_source_marker() -> String {
    "src".to_string()
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            source_marker: default_source_marker(),
        }
    }
}

impl PackageLayout {
    fn prefix_segments(&self) -> impl Iterator<Item = &str> {
        self.prefix.split('/').filter(|s| !s.is_empty())
    }

    /// First segment of the prefix, e.g. `packages`.
    pub fn prefix_marker(&self) -> &str {
        self.prefix_segments().next().unwrap_or_default()
    }

    /// Rewrite a logical path to be relative to the tree root.
    pub fn relative_path(&self, logical: &str) -> String {
        let trimmed = strip_root(logical);
        let first = trimmed.split('/').next().unwrap_or_default();

        let nest = first == self.source_marker || first != self.prefix_marker();
        if nest {
            let prefix = self.prefix.trim_matches('/');
            format!("{}/{}", prefix, trimmed)
        } else {
            trimmed.to_string()
        }
    }

    /// Resolve a logical path to a concrete path under `tree_root`.
    ///
    /// Returns `None` when the path would leave the tree (`..` or a root
    /// component). Does not check that the file exists.
    pub fn resolve(&self, tree_root: &Path, logical: &str) -> Option<PathBuf> {
        let relative = PathBuf::from(self.relative_path(logical));
        let contained = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        contained.then(|| tree_root.join(relative))
    }
}

fn strip_root(logical: &str) -> &str {
    let mut path = logical.trim();
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        } else {
            return path;
        }
    }
}
