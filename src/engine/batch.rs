//! Applying every document in a manifest and keeping the run's accounting.

use std::{
    ops::AddAssign,
    path::{Path, PathBuf},
};

use super::substitute::{ApplicationResult, ApplyOptions, apply_document};
use crate::{
    error::{PatchError, Result},
    translation::{Category, DocumentRef, ModuleManifest, load_document},
};

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Documents resolved and applied, including ones that changed nothing.
    pub files_processed: usize,
    /// Documents that were missing or could not be resolved to a file.
    pub files_skipped: usize,
    pub total_replacements: usize,
}

impl RunStatistics {
    pub fn record(&mut self, result: &ApplicationResult) {
        if result.is_skipped() {
            self.files_skipped += 1;
        } else {
            self.files_processed += 1;
            self.total_replacements += result.replacements;
        }
    }
}

impl AddAssign for RunStatistics {
    fn add_assign(&mut self, other: Self) {
        self.files_processed += other.files_processed;
        self.files_skipped += other.files_skipped;
        self.total_replacements += other.total_replacements;
    }
}

/// Outcome of comparing the tree's declared version with the manifest's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    Match,
    Mismatch { tree: String, manifest: String },
    /// The tree declares no version, so nothing was compared.
    Unknown,
}

impl VersionCheck {
    pub fn compare(tree_version: Option<&str>, manifest_version: &str) -> Self {
        match tree_version {
            None => VersionCheck::Unknown,
            Some(tree) if tree == manifest_version => VersionCheck::Match,
            Some(tree) => VersionCheck::Mismatch {
                tree: tree.to_string(),
                manifest: manifest_version.to_string(),
            },
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, VersionCheck::Mismatch { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub statistics: RunStatistics,
    pub version_check: VersionCheck,
}

/// Observer for per-document progress.
///
/// The batch applier reports through this trait instead of printing, so the
/// same run can feed a console, a test recorder, or nothing at all.
pub trait ProgressSink {
    fn version_checked(&mut self, _check: &VersionCheck) {}

    fn category_started(&mut self, _category: Category, _documents: usize) {}

    /// The document file referenced by the manifest does not exist.
    fn document_missing(&mut self, _category: Category, _reference: &DocumentRef, _path: &Path) {}

    fn document_applied(
        &mut self,
        _category: Category,
        _reference: &DocumentRef,
        _result: &ApplicationResult,
    ) {
    }
}

impl ProgressSink for () {}

/// Everything a batch run needs besides the manifest.
#[derive(Debug, Clone)]
pub struct BatchContext<'a> {
    pub tree_root: &'a Path,
    pub tree_version: Option<&'a str>,
    pub resources_root: &'a Path,
    pub options: &'a ApplyOptions,
}

/// Apply every document of `manifest` to the tree, category by category.
///
/// A missing document or target file is counted as skipped and the run
/// continues. Unparsable documents and I/O failures abort the run; files
/// already written stay written.
pub fn apply_all(
    ctx: &BatchContext<'_>,
    manifest: &ModuleManifest,
    sink: &mut dyn ProgressSink,
) -> Result<RunReport> {
    let version_check = VersionCheck::compare(ctx.tree_version, &manifest.version);
    sink.version_checked(&version_check);

    let mut statistics = RunStatistics::default();

    for (category, references) in &manifest.modules {
        sink.category_started(*category, references.len());

        for reference in references {
            statistics += apply_reference(ctx, *category, reference, sink)?;
        }
    }

    Ok(RunReport {
        statistics,
        version_check,
    })
}

fn apply_reference(
    ctx: &BatchContext<'_>,
    category: Category,
    reference: &DocumentRef,
    sink: &mut dyn ProgressSink,
) -> Result<RunStatistics> {
    let mut statistics = RunStatistics::default();

    let document = match load_document(ctx.resources_root, reference.document()) {
        Ok(document) => document,
        Err(PatchError::NotFound { path }) => {
            sink.document_missing(category, reference, &path);
            statistics.files_skipped += 1;
            return Ok(statistics);
        }
        Err(err) => return Err(err),
    };

    let result = apply_document(
        ctx.tree_root,
        &document,
        reference.target_override(),
        ctx.options,
    )?;
    sink.document_applied(category, reference, &result);
    statistics.record(&result);

    Ok(statistics)
}

/// Sink that keeps every event, for callers that report after the run.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ProgressEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    VersionChecked(VersionCheck),
    CategoryStarted(Category, usize),
    DocumentMissing {
        category: Category,
        document: String,
        path: PathBuf,
    },
    DocumentApplied {
        category: Category,
        document: String,
        result: ApplicationResult,
    },
}

impl ProgressSink for RecordingSink {
    fn version_checked(&mut self, check: &VersionCheck) {
        self.events.push(ProgressEvent::VersionChecked(check.clone()));
    }

    fn category_started(&mut self, category: Category, documents: usize) {
        self.events
            .push(ProgressEvent::CategoryStarted(category, documents));
    }

    fn document_missing(&mut self, category: Category, reference: &DocumentRef, path: &Path) {
        self.events.push(ProgressEvent::DocumentMissing {
            category,
            document: reference.document().to_string(),
            path: path.to_path_buf(),
        });
    }

    fn document_applied(
        &mut self,
        category: Category,
        reference: &DocumentRef,
        result: &ApplicationResult,
    ) {
        self.events.push(ProgressEvent::DocumentApplied {
            category,
            document: reference.document().to_string(),
            result: result.clone(),
        });
    }
}
