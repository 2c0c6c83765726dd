//! Console reporting for CLI commands.
//!
//! Separate from the engine so patchloc can be used as a library. Every
//! printer has a `*_to` variant taking a writer, for tests.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::engine::{
    ApplicationResult, Finding, ProgressSink, RunReport, Severity, VersionCheck,
};
use crate::translation::{Category, DocumentRef};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Prints one status line per document as the batch runs.
///
/// Status lines go to `writer`; warnings go to `warnings`.
pub struct ConsoleSink<W: Write, E: Write> {
    writer: W,
    warnings: E,
    verbose: bool,
}

impl ConsoleSink<io::Stdout, io::Stderr> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), verbose)
    }
}

impl<W: Write, E: Write> ConsoleSink<W, E> {
    pub fn new(writer: W, warnings: E, verbose: bool) -> Self {
        Self {
            writer,
            warnings,
            verbose,
        }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.writer, self.warnings)
    }
}

impl<W: Write, E: Write> ProgressSink for ConsoleSink<W, E> {
    fn version_checked(&mut self, check: &VersionCheck) {
        print_version_check_to(check, self.verbose, &mut self.warnings);
    }

    fn category_started(&mut self, category: Category, documents: usize) {
        if self.verbose {
            let _ = writeln!(
                self.writer,
                "{} {} document(s)",
                format!("[{}]", category).bold(),
                documents
            );
        }
    }

    fn document_missing(&mut self, _category: Category, reference: &DocumentRef, path: &Path) {
        let _ = writeln!(
            self.writer,
            "  {} {}: skipped (translation document not found)",
            FAILURE_MARK.yellow(),
            reference.document()
        );
        if self.verbose {
            let _ = writeln!(self.writer, "    {} {}", "-->".blue(), path.display());
        }
    }

    fn document_applied(
        &mut self,
        _category: Category,
        reference: &DocumentRef,
        result: &ApplicationResult,
    ) {
        let label = if result.file.is_empty() {
            reference.document()
        } else {
            result.file.as_str()
        };

        let _ = match result.skip_reason {
            Some(reason) => writeln!(
                self.writer,
                "  {} {}: skipped ({})",
                FAILURE_MARK.yellow(),
                label,
                reason
            ),
            None if result.replacements > 0 => writeln!(
                self.writer,
                "  {} {}: {} replacement(s)",
                SUCCESS_MARK.green(),
                label,
                result.replacements
            ),
            None => writeln!(
                self.writer,
                "  {} {}",
                "-".dimmed(),
                format!("{}: no match", label).dimmed()
            ),
        };

        if self.verbose
            && let Some(path) = &result.path
        {
            let _ = writeln!(self.writer, "    {} {}", "-->".blue(), path.display());
        }
    }
}

/// Print the version comparison. Only a mismatch, or an unknown version in
/// verbose mode, produces output.
pub fn print_version_check_to<W: Write>(check: &VersionCheck, verbose: bool, writer: &mut W) {
    match check {
        VersionCheck::Mismatch { tree, manifest } => {
            let _ = writeln!(
                writer,
                "{} tree version {} does not match manifest version {}; some strings may remain untranslated",
                "warning:".bold().yellow(),
                tree,
                manifest
            );
        }
        VersionCheck::Unknown if verbose => {
            let _ = writeln!(
                writer,
                "{} target tree declares no version; skipping version check",
                "note:".bold()
            );
        }
        _ => {}
    }
}

/// Warn about manifest categories that will not be processed.
pub fn print_ignored_categories(names: &[String]) {
    print_ignored_categories_to(names, &mut io::stderr().lock());
}

pub fn print_ignored_categories_to<W: Write>(names: &[String], writer: &mut W) {
    for name in names {
        let _ = writeln!(
            writer,
            "{} unknown category '{}' in manifest is ignored",
            "warning:".bold().yellow(),
            name
        );
    }
}

/// Print the final statistics line.
pub fn print_run_summary(report: &RunReport, dry_run: bool) {
    print_run_summary_to(report, dry_run, &mut io::stdout().lock());
}

pub fn print_run_summary_to<W: Write>(report: &RunReport, dry_run: bool, writer: &mut W) {
    let stats = &report.statistics;
    let verb = if dry_run { "Would apply" } else { "Applied" };
    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} replacement(s) in {} file(s), {} skipped",
            verb, stats.total_replacements, stats.files_processed, stats.files_skipped
        )
        .green()
    );
}

/// Print audit findings, errors first, followed by a count line.
pub fn print_findings(findings: &[Finding], documents: usize) {
    print_findings_to(findings, documents, &mut io::stdout().lock());
}

pub fn print_findings_to<W: Write>(findings: &[Finding], documents: usize, writer: &mut W) {
    if findings.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} - no issues found",
                documents,
                if documents == 1 { "document" } else { "documents" }
            )
            .green()
        );
        return;
    }

    for finding in findings {
        let severity = match finding.severity() {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
        };
        let _ = writeln!(
            writer,
            "{}: {}  {}",
            severity,
            finding.message,
            finding.kind.to_string().dimmed().cyan()
        );
        let location = match finding.category {
            Some(category) => format!("{} ({})", finding.document, category),
            None => finding.document.clone(),
        };
        let _ = writeln!(writer, "  {} {}", "-->".blue(), location);
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();
    let warnings = findings.len() - errors;
    let _ = writeln!(writer);
    let _ = writeln!(
        writer,
        "{} {} error(s), {} warning(s) in {} document(s)",
        FAILURE_MARK.red(),
        errors,
        warnings,
        documents
    );
}
