//! The translation application engine.
//!
//! ```text
//! ModuleManifest
//!     ↓  (per category, in fixed order)
//! TranslationDocument
//!     ↓  PackageLayout::resolve
//! target file
//!     ↓  substitute
//! ApplicationResult → RunStatistics
//! ```

mod audit;
mod batch;
mod resolve;
mod substitute;

pub use audit::{Finding, FindingKind, Severity, audit};
pub use batch::{
    BatchContext, ProgressEvent, ProgressSink, RecordingSink, RunReport, RunStatistics,
    VersionCheck, apply_all,
};
pub use resolve::PackageLayout;
pub use substitute::{
    ApplicationResult, ApplyOptions, ReplacementMode, SkipReason, Substitution, apply_document,
    substitute,
};
