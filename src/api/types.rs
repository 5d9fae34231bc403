//! Shared types for the WASM API
//!
//! Plain data shapes handed to JavaScript.

use crate::models::RasterSnapshot;

/// Pixel data in the layout of a canvas `ImageData`
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct GlyphData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl From<&RasterSnapshot> for GlyphData {
    fn from(raster: &RasterSnapshot) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            rgba: raster.as_rgba().to_vec(),
        }
    }
}

/// Undo/redo availability, returned after every history-affecting command
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_count: usize,
    pub redo_count: usize,
}

/// Outcome of a command plus the state the UI needs to refresh
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub outcome: crate::models::EditOutcome,
    pub characters: Vec<String>,
    pub current_character: Option<String>,
    pub history: HistoryStatus,
}
