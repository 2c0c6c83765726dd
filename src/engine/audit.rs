//! Static checks over a manifest and its documents. Nothing is written.

use std::{
    collections::HashSet,
    fmt,
    path::{Component, Path},
};

use walkdir::WalkDir;

use super::resolve::PackageLayout;
use crate::{
    error::{PatchError, Result},
    translation::{
        Category, DocumentRef, MANIFEST_FILE_NAME, ModuleManifest, TranslationDocument,
        load_document,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingKind {
    MissingDocument,
    InvalidDocument,
    EmptyOriginal,
    NoTarget,
    MissingTarget,
    NoopPair,
    SelfReapplying,
    Cascade,
    UnreferencedDocument,
    UnknownCategory,
}

impl FindingKind {
    pub fn severity(self) -> Severity {
        match self {
            FindingKind::MissingDocument
            | FindingKind::InvalidDocument
            | FindingKind::EmptyOriginal => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FindingKind::MissingDocument => "missing-document",
            FindingKind::InvalidDocument => "invalid-document",
            FindingKind::EmptyOriginal => "empty-original",
            FindingKind::NoTarget => "no-target",
            FindingKind::MissingTarget => "missing-target",
            FindingKind::NoopPair => "noop-pair",
            FindingKind::SelfReapplying => "self-reapplying",
            FindingKind::Cascade => "cascade",
            FindingKind::UnreferencedDocument => "unreferenced-document",
            FindingKind::UnknownCategory => "unknown-category",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub category: Option<Category>,
    /// Document path relative to the resources root (or the category name).
    pub document: String,
    pub message: String,
}

impl Finding {
    fn new(
        kind: FindingKind,
        category: Option<Category>,
        document: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category,
            document: document.into(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Check `manifest` and every document it references.
///
/// Target files are only checked for existence when `tree_root` is given.
/// I/O errors other than a missing document are returned as errors.
pub fn audit(
    resources_root: &Path,
    manifest: &ModuleManifest,
    tree_root: Option<&Path>,
    layout: &PackageLayout,
) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();

    for name in &manifest.ignored_categories {
        findings.push(Finding::new(
            FindingKind::UnknownCategory,
            None,
            name.as_str(),
            format!("category '{}' is not processed", name),
        ));
    }

    for (category, reference) in manifest.iter_documents() {
        let document = match load_document(resources_root, reference.document()) {
            Ok(document) => document,
            Err(PatchError::NotFound { .. }) => {
                findings.push(Finding::new(
                    FindingKind::MissingDocument,
                    Some(category),
                    reference.document(),
                    "document file does not exist",
                ));
                continue;
            }
            Err(PatchError::Parse { source, .. }) => {
                findings.push(Finding::new(
                    FindingKind::InvalidDocument,
                    Some(category),
                    reference.document(),
                    source.to_string(),
                ));
                continue;
            }
            Err(err) => return Err(err),
        };

        check_target(&mut findings, category, reference, &document, tree_root, layout);
        check_pairs(&mut findings, category, reference, &document);
    }

    findings.extend(unreferenced_documents(resources_root, manifest));
    findings.sort_by_key(|finding| finding.severity());

    Ok(findings)
}

fn check_target(
    findings: &mut Vec<Finding>,
    category: Category,
    reference: &DocumentRef,
    document: &TranslationDocument,
    tree_root: Option<&Path>,
    layout: &PackageLayout,
) {
    let Some(target) = reference.target_override().or_else(|| document.target()) else {
        findings.push(Finding::new(
            FindingKind::NoTarget,
            Some(category),
            reference.document(),
            "no targetFile and no manifest override",
        ));
        return;
    };

    let Some(tree_root) = tree_root else {
        return;
    };
    let message = match layout.resolve(tree_root, target) {
        Some(path) if path.is_file() => return,
        Some(path) => format!("{} not found at {}", target, path.display()),
        None => format!("{} points outside the target tree", target),
    };
    findings.push(Finding::new(
        FindingKind::MissingTarget,
        Some(category),
        reference.document(),
        message,
    ));
}

fn check_pairs(
    findings: &mut Vec<Finding>,
    category: Category,
    reference: &DocumentRef,
    document: &TranslationDocument,
) {
    let pairs: Vec<_> = document.replacements.iter().collect();

    for (index, pair) in pairs.iter().enumerate() {
        if pair.original.is_empty() {
            findings.push(Finding::new(
                FindingKind::EmptyOriginal,
                Some(category),
                reference.document(),
                format!("pair #{} has an empty original", index + 1),
            ));
            continue;
        }
        if pair.original == pair.translated {
            findings.push(Finding::new(
                FindingKind::NoopPair,
                Some(category),
                reference.document(),
                format!("\"{}\" translates to itself", pair.original),
            ));
            continue;
        }
        if pair.translated.contains(pair.original.as_str()) {
            findings.push(Finding::new(
                FindingKind::SelfReapplying,
                Some(category),
                reference.document(),
                format!(
                    "\"{}\" appears in its own translation and is replaced again on every run",
                    pair.original
                ),
            ));
        }

        for earlier in pairs[..index].iter().filter(|earlier| !earlier.is_noop()) {
            if pair.translated.contains(earlier.original.as_str()) {
                findings.push(Finding::new(
                    FindingKind::Cascade,
                    Some(category),
                    reference.document(),
                    format!(
                        "translation of \"{}\" contains \"{}\", which an earlier pair rewrites on the next run",
                        pair.original, earlier.original
                    ),
                ));
            }
        }

        for later in pairs[index + 1..].iter().filter(|later| !later.is_noop()) {
            if pair.translated.contains(later.original.as_str()) {
                findings.push(Finding::new(
                    FindingKind::Cascade,
                    Some(category),
                    reference.document(),
                    format!(
                        "translation of \"{}\" contains \"{}\", which a later pair rewrites",
                        pair.original, later.original
                    ),
                ));
            }
        }
    }
}

fn unreferenced_documents(resources_root: &Path, manifest: &ModuleManifest) -> Vec<Finding> {
    let referenced: HashSet<String> = manifest
        .iter_documents()
        .map(|(_, reference)| normalize(Path::new(reference.document())))
        .collect();

    let mut unreferenced: Vec<String> = WalkDir::new(resources_root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("json"))
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(resources_root)
                .ok()
                .map(normalize)
        })
        .filter(|relative| relative != MANIFEST_FILE_NAME && !referenced.contains(relative))
        .collect();
    unreferenced.sort();

    unreferenced
        .into_iter()
        .map(|relative| {
            Finding::new(
                FindingKind::UnreferencedDocument,
                None,
                relative,
                "not listed in the manifest",
            )
        })
        .collect()
}

fn normalize(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
