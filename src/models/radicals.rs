//! Radical library
//!
//! Radicals are named, reusable lists of glyph fragments used when composing
//! complex characters. Fragment descriptors are opaque JSON values: the core
//! only checks that a radical is a list of them and never interprets their
//! contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{FontError, Result};

/// Opaque, comparable-by-value fragment of a glyph composition
pub type FragmentDescriptor = Value;

/// Name to fragment-list mapping. Names are unique.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct RadicalLibrary {
    radicals: BTreeMap<String, Vec<FragmentDescriptor>>,
}

/// Only the radicals of a font file are read, everything else is ignored
#[derive(Deserialize)]
struct RadicalsField {
    #[serde(default, deserialize_with = "super::document::null_as_default")]
    radicals: RadicalLibrary,
}

impl RadicalLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON mapping of radical name to fragment list.
    ///
    /// Fails on anything that is not such a mapping; nothing is applied here,
    /// the caller swaps the result in with [`RadicalLibrary::load`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        let library: RadicalLibrary = serde_json::from_slice(data)
            .map_err(|e| FontError::MalformedRadicals(e.to_string()))?;
        library.validate_names()?;
        Ok(library)
    }

    /// Replace the whole library. On malformed input the library is untouched.
    pub fn load(&mut self, data: &[u8]) -> Result<usize> {
        let parsed = Self::parse(data)?;
        *self = parsed;
        log::info!("Radicals loaded: {} entries", self.radicals.len());
        Ok(self.radicals.len())
    }

    /// Replace the library with the `radicals` field of a whole font file.
    /// A file without that field yields an empty library.
    pub fn load_from_document(&mut self, data: &[u8]) -> Result<usize> {
        let field: RadicalsField = serde_json::from_slice(data)
            .map_err(|e| FontError::MalformedRadicals(e.to_string()))?;
        field.radicals.validate_names()?;
        *self = field.radicals;
        log::info!("Radicals loaded from font file: {} entries", self.radicals.len());
        Ok(self.radicals.len())
    }

    /// Insert or overwrite one radical from its JSON fragment list
    pub fn add(&mut self, name: &str, fragments: &str) -> Result<()> {
        if name.is_empty() {
            return Err(FontError::MalformedRadicals("radical name is empty".to_string()));
        }
        let fragments: Vec<FragmentDescriptor> = serde_json::from_str(fragments)
            .map_err(|e| FontError::MalformedRadicals(format!("{}: {}", name, e)))?;
        self.insert(name, fragments);
        Ok(())
    }

    /// Insert already-parsed fragments
    pub fn insert(&mut self, name: &str, fragments: Vec<FragmentDescriptor>) {
        log::info!("Radical added: {} ({} fragments)", name, fragments.len());
        self.radicals.insert(name.to_string(), fragments);
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<FragmentDescriptor>> {
        self.radicals.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&[FragmentDescriptor]> {
        self.radicals.get(name).map(Vec::as_slice)
    }

    /// Radical names (sorted)
    pub fn list(&self) -> Vec<String> {
        self.radicals.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.radicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radicals.is_empty()
    }

    fn validate_names(&self) -> Result<()> {
        if self.radicals.contains_key("") {
            return Err(FontError::MalformedRadicals("radical name is empty".to_string()));
        }
        Ok(())
    }
}
