//! Shared helpers for WASM API operations
//!
//! This module contains common patterns and utilities for serialization,
//! error handling and access to the session across all API operations.

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::models::{FontError, RasterSnapshot};
use crate::session::FontSession;

// WASM-owned session (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<FontSession> = Mutex::new(FontSession::default());
}

/// Lock the session for one command
pub fn lock_session() -> Result<MutexGuard<'static, FontSession>, JsValue> {
    SESSION.lock().map_err(|e| {
        let msg = format!("Session lock poisoned: {}", e);
        crate::wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        crate::wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling.
///
/// Maps become plain objects and `None` becomes `null`, so fragment
/// descriptors reach JavaScript in the same shape as in the JSON file.
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        crate::wasm_error!("{}", msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Log a core error and convert it to a JsValue
pub fn to_js_error(e: FontError) -> JsValue {
    let msg = e.to_string();
    crate::wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}

/// Build a raster from a canvas `ImageData` buffer
pub fn raster_from_js(width: u32, height: u32, rgba: Vec<u8>) -> Result<RasterSnapshot, JsValue> {
    RasterSnapshot::from_rgba(width, height, rgba).map_err(to_js_error)
}

/// Validate that a character argument is usable as a slot key
pub fn validate_character(character: &str) -> Result<(), String> {
    if character.chars().count() > 8 {
        return Err(format!(
            "Character key too long: {:?} (max 8 characters)",
            character
        ));
    }
    Ok(())
}

/// Validate every slot key of a font document text.
///
/// Text that is not a font document passes here; the import reports it.
pub fn validate_document_characters(json: &str) -> Result<(), String> {
    #[derive(Deserialize)]
    struct SlotKeys {
        #[serde(default)]
        slots: Option<serde_json::Map<String, serde_json::Value>>,
    }

    let Ok(keys) = serde_json::from_str::<SlotKeys>(json) else {
        return Ok(());
    };
    for character in keys.slots.iter().flat_map(|slots| slots.keys()) {
        validate_character(character)?;
    }
    Ok(())
}

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    crate::wasm_error!("{}", msg);
    JsValue::from_str(&msg)
}
