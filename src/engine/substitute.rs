//! Literal text substitution over a single target file.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::resolve::PackageLayout;
use crate::{
    error::{PatchError, Result},
    translation::{Replacement, Replacements, TranslationDocument},
};

/// How successive replacement pairs see each other's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementMode {
    /// Each pair runs on the output of the previous one.
    #[default]
    Chained,
    /// All pairs match against the original text in one pass.
    Snapshot,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub layout: PackageLayout,
    pub mode: ReplacementMode,
    /// Count replacements without writing anything back.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoFileSpecified,
    FileNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoFileSpecified => f.write_str("No file specified"),
            SkipReason::FileNotFound => f.write_str("File not found"),
        }
    }
}

/// Outcome of applying one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationResult {
    /// Logical target path as written in the document (or manifest override).
    pub file: String,
    /// Concrete path in the tree, when a target was specified.
    pub path: Option<PathBuf>,
    pub replacements: usize,
    pub skip_reason: Option<SkipReason>,
}

impl ApplicationResult {
    fn skipped(file: String, path: Option<PathBuf>, reason: SkipReason) -> Self {
        Self {
            file,
            path,
            replacements: 0,
            skip_reason: Some(reason),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }
}

/// Text after substitution plus the number of occurrences replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub content: String,
    pub replacements: usize,
}

/// Replace every literal occurrence of each pair's original text.
///
/// Pairs whose original is empty or equal to the translation are ignored.
pub fn substitute(
    content: &str,
    replacements: &Replacements,
    mode: ReplacementMode,
) -> Result<Substitution> {
    match mode {
        ReplacementMode::Chained => Ok(substitute_chained(content, replacements)),
        ReplacementMode::Snapshot => substitute_snapshot(content, replacements),
    }
}

fn substitute_chained(content: &str, replacements: &Replacements) -> Substitution {
    let mut text = content.to_string();
    let mut total = 0;

    for pair in replacements.iter().filter(|pair| !pair.is_noop()) {
        let count = text.matches(pair.original.as_str()).count();
        if count > 0 {
            text = text.replace(&pair.original, &pair.translated);
            total += count;
        }
    }

    Substitution {
        content: text,
        replacements: total,
    }
}

fn substitute_snapshot(content: &str, replacements: &Replacements) -> Result<Substitution> {
    let active: Vec<&Replacement> = replacements.iter().filter(|pair| !pair.is_noop()).collect();
    if active.is_empty() {
        return Ok(Substitution {
            content: content.to_string(),
            replacements: 0,
        });
    }

    // Alternation is leftmost-first, so declaration order breaks ties.
    let pattern = active
        .iter()
        .map(|pair| regex::escape(&pair.original))
        .collect::<Vec<_>>()
        .join("|");
    let matcher = Regex::new(&pattern)?;

    let mut total = 0;
    let replaced = matcher.replace_all(content, |caps: &Captures| {
        let matched = &caps[0];
        total += 1;
        active
            .iter()
            .find(|pair| pair.original == matched)
            .map(|pair| pair.translated.clone())
            .unwrap_or_else(|| matched.to_string())
    });

    Ok(Substitution {
        content: replaced.into_owned(),
        replacements: total,
    })
}

/// Apply a document to its target file inside `tree_root`.
///
/// `target_override` takes precedence over the document's own target. A
/// missing target or missing file is reported as skipped without touching
/// disk; read and write failures are errors. The file is written at most
/// once, and only when something was replaced.
pub fn apply_document(
    tree_root: &Path,
    document: &TranslationDocument,
    target_override: Option<&str>,
    options: &ApplyOptions,
) -> Result<ApplicationResult> {
    let Some(file) = target_override.or_else(|| document.target()) else {
        return Ok(ApplicationResult::skipped(
            String::new(),
            None,
            SkipReason::NoFileSpecified,
        ));
    };
    let file = file.to_string();

    let Some(path) = options.layout.resolve(tree_root, &file) else {
        return Ok(ApplicationResult::skipped(
            file,
            None,
            SkipReason::FileNotFound,
        ));
    };
    if !path.is_file() {
        return Ok(ApplicationResult::skipped(
            file,
            Some(path),
            SkipReason::FileNotFound,
        ));
    }

    let content = fs::read_to_string(&path).map_err(|err| PatchError::io(&path, err))?;
    let substitution = substitute(&content, &document.replacements, options.mode)?;

    if substitution.replacements > 0 && !options.dry_run {
        fs::write(&path, substitution.content).map_err(|err| PatchError::io(&path, err))?;
    }

    Ok(ApplicationResult {
        file,
        path: Some(path),
        replacements: substitution.replacements,
        skip_reason: None,
    })
}
