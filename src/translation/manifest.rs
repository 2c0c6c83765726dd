//! The module manifest: which documents to apply, grouped by category.

use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Areas of the target application's source layout.
///
/// Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Root,
    Dialogs,
    Components,
    Routes,
    Common,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Root,
        Category::Dialogs,
        Category::Components,
        Category::Routes,
        Category::Common,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Root => "root",
            Category::Dialogs => "dialogs",
            Category::Components => "components",
            Category::Routes => "routes",
            Category::Common => "common",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A manifest entry pointing at a translation document.
///
/// Either a bare path, or an object whose `target` overrides the document's
/// own `targetFile`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DocumentRef {
    Path(String),
    Detailed {
        document: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<String>,
    },
}

impl DocumentRef {
    pub fn document(&self) -> &str {
        match self {
            DocumentRef::Path(path) => path,
            DocumentRef::Detailed { document, .. } => document,
        }
    }

    pub fn target_override(&self) -> Option<&str> {
        match self {
            DocumentRef::Path(_) => None,
            DocumentRef::Detailed { target, .. } => target
                .as_deref()
                .map(str::trim)
                .filter(|target| !target.is_empty()),
        }
    }
}

impl From<&str> for DocumentRef {
    fn from(path: &str) -> Self {
        DocumentRef::Path(path.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    modules: BTreeMap<String, Vec<DocumentRef>>,
}

#[derive(Debug, Clone, Default)]
pub struct ModuleManifest {
    pub name: String,
    pub version: String,
    /// Categories present in the manifest, in processing order.
    pub modules: Vec<(Category, Vec<DocumentRef>)>,
    /// Category names the manifest declares that are not processed.
    pub ignored_categories: Vec<String>,
}

impl ModuleManifest {
    pub fn documents(&self, category: Category) -> &[DocumentRef] {
        self.modules
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, docs)| docs.as_slice())
            .unwrap_or_default()
    }

    pub fn document_count(&self) -> usize {
        self.modules.iter().map(|(_, docs)| docs.len()).sum()
    }

    /// Every document reference in processing order.
    pub fn iter_documents(&self) -> impl Iterator<Item = (Category, &DocumentRef)> {
        self.modules
            .iter()
            .flat_map(|(category, docs)| docs.iter().map(move |doc| (*category, doc)))
    }
}

impl From<RawManifest> for ModuleManifest {
    fn from(raw: RawManifest) -> Self {
        let RawManifest {
            name,
            version,
            mut modules,
        } = raw;

        let ordered = Category::ALL
            .into_iter()
            .filter_map(|category| {
                modules
                    .remove(category.as_str())
                    .map(|docs| (category, docs))
            })
            .collect();

        Self {
            name,
            version,
            modules: ordered,
            ignored_categories: modules.into_keys().collect(),
        }
    }
}

pub fn parse_manifest(content: &str, path: &Path) -> Result<ModuleManifest> {
    let raw: RawManifest = serde_json::from_str(content).map_err(|source| PatchError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.into())
}

pub fn manifest_path(resources_root: &Path) -> PathBuf {
    resources_root.join(MANIFEST_FILE_NAME)
}

/// Load `manifest.json` from the resources root.
pub fn load_manifest(resources_root: &Path) -> Result<ModuleManifest> {
    let path = manifest_path(resources_root);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PatchError::ConfigMissing { path });
        }
        Err(err) => return Err(PatchError::io(path, err)),
    };
    parse_manifest(&content, &path)
}
