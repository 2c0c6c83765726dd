//! Patchloc - declarative translation patches for application source trees
//!
//! Patchloc is a CLI tool and library that localizes a third-party
//! application by replacing known source-text fragments with translated
//! equivalents. Replacements are described in JSON translation documents,
//! grouped by category in a module manifest, and applied with exact literal
//! matching so that re-running a patch is a no-op.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, console reporting)
//! - `config`: Configuration file loading and parsing
//! - `engine`: Path resolution, substitution, batch application and auditing
//! - `error`: Typed errors raised by the engine
//! - `translation`: Manifest and translation document loading
//! - `tree`: Target tree discovery and version lookup

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod translation;
pub mod tree;

pub use error::{PatchError, Result};
