//! Session configuration
//!
//! Handed over from JavaScript as a plain object; every field is optional
//! and falls back to the defaults of the drawing page.

use serde::{Deserialize, Serialize};

/// Settings fixed for the lifetime of a session
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Drawing surface width in pixels
    #[serde(default = "default_canvas_size")]
    pub canvas_width: u32,

    /// Drawing surface height in pixels
    #[serde(default = "default_canvas_size")]
    pub canvas_height: u32,

    /// Brush diameter in pixels
    #[serde(default = "default_brush_size")]
    pub brush_size: u32,

    /// Brush colour as RGBA
    #[serde(default = "default_brush_color")]
    pub brush_color: [u8; 4],

    /// Persistent store key for whole-document save/load
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// File name offered when exporting
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_canvas_size() -> u32 {
    400
}
fn default_brush_size() -> u32 {
    5
}
fn default_brush_color() -> [u8; 4] {
    [0, 0, 0, 255]
}
fn default_storage_key() -> String {
    "fontData".to_string()
}
fn default_export_file_name() -> String {
    "font.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_size(),
            canvas_height: default_canvas_size(),
            brush_size: default_brush_size(),
            brush_color: default_brush_color(),
            storage_key: default_storage_key(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl SessionConfig {
    pub fn with_canvas_size(width: u32, height: u32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Default::default()
        }
    }
}
