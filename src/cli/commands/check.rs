//! Check command - Validate the manifest and its translation documents.
//!
//! Nothing is written. Target files are checked for existence only when a
//! target tree can be located.

use anyhow::Result;

use super::super::{args::CheckCommand, exit_status::ExitStatus, report};
use super::context::CommandContext;
use crate::engine::{Severity, audit};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;
    let manifest = ctx.load_manifest()?;

    // An explicit --tree must exist; configured candidates are optional here.
    let tree_root = if args.common.tree.is_some() {
        Some(ctx.locate_tree()?)
    } else {
        ctx.try_locate_tree()
    };

    let findings = audit(
        &ctx.resources_root,
        &manifest,
        tree_root.as_deref(),
        ctx.layout(),
    )?;
    report::print_findings(&findings, manifest.document_count());

    let errors = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();
    Ok(ExitStatus::from_error_count(errors))
}
