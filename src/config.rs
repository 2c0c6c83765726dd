use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::engine::{PackageLayout, ReplacementMode};

pub const CONFIG_FILE_NAME: &str = ".patchlocrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `manifest.json` and the translation documents.
    #[serde(default = "default_resources_root")]
    pub resources_root: String,
    /// Where to look for the target tree, in order.
    #[serde(default = "default_candidate_roots")]
    pub candidate_roots: Vec<String>,
    #[serde(default)]
    pub layout: PackageLayout,
    #[serde(default)]
    pub mode: ReplacementMode,
}

fn default_resources_root() -> String {
    "./translations".to_string()
}

fn default_candidate_roots() -> Vec<String> {
    ["./upstream", "../upstream"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources_root: default_resources_root(),
            candidate_roots: default_candidate_roots(),
            layout: PackageLayout::default(),
            mode: ReplacementMode::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// The layout prefix must be exactly two path segments.
    pub fn validate(&self) -> Result<()> {
        let segments: Vec<&str> = self
            .layout
            .prefix
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() != 2 {
            bail!(
                "Invalid 'layout.prefix': \"{}\" (expected two segments, e.g. \"packages/app\")",
                self.layout.prefix
            );
        }
        if self.layout.source_marker.is_empty() || self.layout.source_marker.contains('/') {
            bail!(
                "Invalid 'layout.sourceMarker': \"{}\" (expected a single path segment)",
                self.layout.source_marker
            );
        }
        if self.resources_root.trim().is_empty() {
            bail!("'resourcesRoot' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative config paths are resolved against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
