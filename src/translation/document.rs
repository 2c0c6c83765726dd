//! Translation documents: one target file plus its ordered replacement pairs.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::error::{PatchError, Result};

/// A single original → translated pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub original: String,
    pub translated: String,
}

impl Replacement {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }

    /// A pair that can never change file content.
    pub fn is_noop(&self) -> bool {
        self.original.is_empty() || self.original == self.translated
    }
}

/// Replacement pairs in declaration order.
///
/// Serialized as a JSON object. Order is application order, so it is kept
/// exactly as written. A repeated key keeps its first position and takes the
/// last value, matching how an insertion-ordered map behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements(Vec<Replacement>);

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, original: impl Into<String>, translated: impl Into<String>) {
        let original = original.into();
        let translated = translated.into();
        match self.0.iter_mut().find(|pair| pair.original == original) {
            Some(existing) => existing.translated = translated,
            None => self.0.push(Replacement {
                original,
                translated,
            }),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Replacements {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut replacements = Replacements::new();
        for (original, translated) in iter {
            replacements.insert(original, translated);
        }
        replacements
    }
}

impl<'a> IntoIterator for &'a Replacements {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for pair in &self.0 {
            map.serialize_entry(&pair.original, &pair.translated)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Replacements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedPairs;

        impl<'de> Visitor<'de> for OrderedPairs {
            type Value = Replacements;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping original text to translated text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut replacements = Replacements::new();
                while let Some((original, translated)) = access.next_entry::<String, String>()? {
                    replacements.insert(original, translated);
                }
                Ok(replacements)
            }
        }

        deserializer.deserialize_map(OrderedPairs)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationDocument {
    #[serde(default, alias = "file", skip_serializing_if = "Option::is_none")]
    pub target_file: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub replacements: Replacements,
}

impl TranslationDocument {
    /// The declared target, or `None` when absent or blank.
    pub fn target(&self) -> Option<&str> {
        self.target_file
            .as_deref()
            .map(str::trim)
            .filter(|target| !target.is_empty())
    }
}

/// Parse a document from a string. `path` is only used for error reporting.
pub fn parse_document(content: &str, path: &Path) -> Result<TranslationDocument> {
    serde_json::from_str(content).map_err(|source| PatchError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the document at `relative_path` under `resources_root`.
///
/// A missing file is reported as [`PatchError::NotFound`]; malformed content
/// as [`PatchError::Parse`].
pub fn load_document(resources_root: &Path, relative_path: &str) -> Result<TranslationDocument> {
    let path = document_path(resources_root, relative_path);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(PatchError::NotFound { path });
        }
        Err(err) => return Err(PatchError::io(path, err)),
    };
    parse_document(&content, &path)
}

pub fn document_path(resources_root: &Path, relative_path: &str) -> PathBuf {
    resources_root.join(relative_path.trim_start_matches("./"))
}
