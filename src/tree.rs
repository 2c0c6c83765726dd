//! Locating the target tree and reading its declared version.
//!
//! Candidate roots are an explicit ordered list supplied by the caller; the
//! engine itself only ever sees the root that was picked here.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const PACKAGE_FILE_NAME: &str = "package.json";

#[derive(Debug, Clone, Default)]
pub struct TreeLocator {
    candidates: Vec<PathBuf>,
}

impl TreeLocator {
    pub fn new(candidates: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Relative candidates are resolved against `base_dir`.
    pub fn locate(&self, base_dir: &Path) -> Result<PathBuf> {
        for candidate in &self.candidates {
            let root = base_dir.join(candidate);
            if root.join(PACKAGE_FILE_NAME).is_file() {
                return Ok(root);
            }
        }

        if self.candidates.is_empty() {
            bail!("No target tree configured. Pass --tree or set candidateRoots.");
        }
        let tried = self
            .candidates
            .iter()
            .map(|c| format!("  - {}", base_dir.join(c).display()))
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "No target tree found (no {} in any candidate):\n{}",
            PACKAGE_FILE_NAME,
            tried
        )
    }
}

#[derive(Debug, Deserialize)]
struct PackageInfo {
    #[serde(default)]
    version: Option<String>,
}

/// Version declared in the tree's `package.json`, if any.
pub fn read_tree_version(root: &Path) -> Result<Option<String>> {
    let path = root.join(PACKAGE_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let info: PackageInfo = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(info.version.filter(|v| !v.is_empty()))
}
