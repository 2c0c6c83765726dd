//! Translation resources: the module manifest and the documents it lists.

mod document;
mod manifest;

pub use document::{
    Replacement, Replacements, TranslationDocument, document_path, load_document, parse_document,
};
pub use manifest::{
    Category, DocumentRef, MANIFEST_FILE_NAME, ModuleManifest, load_manifest, manifest_path,
    parse_manifest,
};
