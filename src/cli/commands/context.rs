use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};

use super::super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    engine::PackageLayout,
    translation::{ModuleManifest, load_manifest},
    tree::TreeLocator,
};

/// Resolved settings for one command invocation.
///
/// Command-line flags win over the config file; relative config paths are
/// resolved against the directory the config file was found in.
pub struct CommandContext {
    pub config: Config,
    pub resources_root: PathBuf,
    pub locator: TreeLocator,
    pub working_dir: PathBuf,
    pub verbose: bool,
}

impl CommandContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let working_dir = env::current_dir().context("Failed to read current directory")?;
        Self::with_working_dir(args, working_dir)
    }

    pub fn with_working_dir(args: &CommonArgs, working_dir: PathBuf) -> Result<Self> {
        let loaded = load_config(&working_dir)?;
        let base_dir = loaded.base_dir;
        let config = loaded.config;

        let resources_root = match &args.resources {
            Some(path) => working_dir.join(path),
            None => base_dir.join(&config.resources_root),
        };

        // An explicit tree replaces the configured candidates entirely.
        let locator = match &args.tree {
            Some(tree) => TreeLocator::new([working_dir.join(tree)]),
            None => TreeLocator::new(
                config
                    .candidate_roots
                    .iter()
                    .map(|candidate| base_dir.join(candidate)),
            ),
        };

        Ok(Self {
            config,
            resources_root,
            locator,
            working_dir,
            verbose: args.verbose,
        })
    }

    pub fn layout(&self) -> &PackageLayout {
        &self.config.layout
    }

    pub fn load_manifest(&self) -> Result<ModuleManifest> {
        load_manifest(&self.resources_root).context("Failed to load translation manifest")
    }

    pub fn locate_tree(&self) -> Result<PathBuf> {
        self.locator.locate(&self.working_dir)
    }

    /// Like [`Self::locate_tree`], but `None` when no candidate matches.
    pub fn try_locate_tree(&self) -> Option<PathBuf> {
        self.locate_tree().ok()
    }

    pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.working_dir)
            .unwrap_or(path)
            .display()
    }
}
