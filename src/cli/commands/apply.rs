//! Apply command - Patch the target tree with every translation document.
//!
//! Documents are applied category by category in manifest order. Missing
//! documents and missing target files are reported and skipped; a malformed
//! document or an I/O failure stops the run.
//!
//! Use `--dry-run` to count replacements without writing.

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::ApplyCommand,
    exit_status::ExitStatus,
    report::{self, ConsoleSink},
};
use super::context::CommandContext;
use crate::{
    engine::{ApplyOptions, BatchContext, ReplacementMode, RunReport, apply_all},
    tree::read_tree_version,
};

pub fn apply(cmd: ApplyCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = CommandContext::new(&args.common)?;
    let report = run(&ctx, args.mode, args.dry_run)?;
    report::print_run_summary(&report, args.dry_run);
    Ok(ExitStatus::Success)
}

fn run(
    ctx: &CommandContext,
    mode: Option<ReplacementMode>,
    dry_run: bool,
) -> Result<RunReport> {
    let manifest = ctx.load_manifest()?;
    let tree_root = ctx.locate_tree()?;
    let tree_version = read_tree_version(&tree_root)?;

    let options = ApplyOptions {
        layout: ctx.layout().clone(),
        mode: mode.unwrap_or(ctx.config.mode),
        dry_run,
    };

    let action = if dry_run { "Checking" } else { "Applying" };
    println!(
        "{} {} {} to {}{}",
        action.bold(),
        manifest.name,
        manifest.version,
        ctx.display_path(&tree_root),
        match &tree_version {
            Some(version) => format!(" ({})", version),
            None => String::new(),
        }
    );
    report::print_ignored_categories(&manifest.ignored_categories);

    let batch = BatchContext {
        tree_root: &tree_root,
        tree_version: tree_version.as_deref(),
        resources_root: &ctx.resources_root,
        options: &options,
    };
    let mut sink = ConsoleSink::stdout(ctx.verbose);

    apply_all(&batch, &manifest, &mut sink).context("Failed to apply translations")
}
