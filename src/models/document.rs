//! Font document exchange format
//!
//! The persisted unit of a font: all slots plus the radical library.
//!
//! ```json
//! {
//!   "slots": { "A": { "width": 400, "height": 400, "rgba": "..." }, "B": null },
//!   "radicals": { "mouth": [ ... ] }
//! }
//! ```
//!
//! Unknown top-level fields are ignored; missing or `null` ones default to
//! empty.

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{FontError, Result};
use super::radicals::RadicalLibrary;
use super::slots::SlotRegistry;

/// Top-level font document
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FontDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: SlotRegistry,

    #[serde(default, deserialize_with = "null_as_default")]
    pub radicals: RadicalLibrary,
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl FontDocument {
    pub fn new(slots: SlotRegistry, radicals: RadicalLibrary) -> Self {
        Self { slots, radicals }
    }

    /// Encode as JSON bytes
    pub fn serialize(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| FontError::Serialization(e.to_string()))
    }

    /// Parse JSON bytes. Nothing is produced unless the whole document is well formed.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| FontError::MalformedDocument(e.to_string()))
    }

    /// Every glyph must have the given dimensions
    pub fn check_raster_size(&self, width: u32, height: u32) -> Result<()> {
        for raster in self.slots.slots().filter_map(|s| s.glyph.as_ref()) {
            if raster.width() != width || raster.height() != height {
                return Err(FontError::RasterSizeMismatch {
                    expected_width: width,
                    expected_height: height,
                    actual_width: raster.width(),
                    actual_height: raster.height(),
                });
            }
        }
        Ok(())
    }
}
