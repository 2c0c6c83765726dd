//! Init command - Write a default config and a skeleton manifest.
//!
//! The config file is never overwritten. The manifest is only created when
//! the configured resources root does not have one yet.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{Map, Value, json};

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::{
    config::{CONFIG_FILE_NAME, Config, default_config_json},
    translation::{Category, manifest_path},
};

pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, default_config_json()?)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    let manifest = manifest_path(Path::new(&Config::default().resources_root));
    if !manifest.exists() {
        write_skeleton_manifest(&manifest)?;
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", manifest.display()).green()
        );
    }

    Ok(ExitStatus::Success)
}

fn skeleton_manifest() -> Value {
    let modules: Map<String, Value> = Category::ALL
        .into_iter()
        .map(|category| (category.as_str().to_string(), json!([])))
        .collect();

    json!({
        "name": "translations",
        "version": "0.0.0",
        "modules": modules,
    })
}

fn write_skeleton_manifest(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(&skeleton_manifest())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
