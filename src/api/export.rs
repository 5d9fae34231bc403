//! Import, export and persistence for the WASM API
//!
//! - Export: the font as exchange-format JSON text, or as a `font.json` download
//! - Import: JSON text picked by the user, applied atomically
//! - Asynchronous loads: `beginLoad` before the host read, `completeLoad` after
//! - Local storage: whole-document save/load under the configured key

use wasm_bindgen::prelude::*;

use crate::api::core::command_result;
use crate::api::helpers::{
    deserialize, lock_session, serialize, to_js_error, validate_document_characters,
    validation_error,
};
use crate::session::{LoadKind, LoadTicket};
use crate::{wasm_info, wasm_warn};

/// Export the whole font as exchange-format JSON
#[wasm_bindgen(js_name = exportFont)]
pub fn export_font() -> Result<String, JsValue> {
    wasm_info!("exportFont called");
    let session = lock_session()?;
    let bytes = session.export_document().map_err(to_js_error)?;
    String::from_utf8(bytes).map_err(|e| JsValue::from_str(&format!("Export is not UTF-8: {}", e)))
}

/// Replace the font with an exchange-format JSON text
#[wasm_bindgen(js_name = importFont)]
pub fn import_font(json: &str) -> Result<JsValue, JsValue> {
    wasm_info!("importFont: {} bytes", json.len());
    validate_document_characters(json).map_err(validation_error)?;
    let mut session = lock_session()?;
    let outcome = session.import_document(json.as_bytes()).map_err(to_js_error)?;
    command_result(&session, outcome)
}

/// Take a ticket before reading a file: `"document"`, `"radicals"` or
/// `"radicalsFromDocument"`
#[wasm_bindgen(js_name = beginLoad)]
pub fn begin_load(kind: JsValue) -> Result<JsValue, JsValue> {
    let kind: LoadKind = deserialize(kind, "LoadKind deserialization error")?;
    let mut session = lock_session()?;
    let ticket = session.begin_load(kind);
    wasm_info!("beginLoad: ticket #{} ({:?})", ticket.id, ticket.kind);
    serialize(&ticket, "LoadTicket serialization error")
}

/// Apply the text of a finished read. Superseded tickets come back `unchanged`.
#[wasm_bindgen(js_name = completeLoad)]
pub fn complete_load(ticket: JsValue, text: &str) -> Result<JsValue, JsValue> {
    let ticket: LoadTicket = deserialize(ticket, "LoadTicket deserialization error")?;
    if ticket.kind == LoadKind::Document {
        validate_document_characters(text).map_err(validation_error)?;
    }
    let mut session = lock_session()?;
    let outcome = session
        .complete_load(ticket, text.as_bytes())
        .map_err(to_js_error)?;
    if !outcome.is_applied() {
        wasm_warn!("completeLoad: ticket #{} dropped", ticket.id);
    }
    command_result(&session, outcome)
}

/// Save the font to `localStorage`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = saveToLocalStorage)]
pub fn save_to_local_storage() -> Result<(), JsValue> {
    wasm_info!("saveToLocalStorage called");
    let mut store = crate::storage::BrowserStore::open().map_err(to_js_error)?;
    let session = lock_session()?;
    session.save_to_store(&mut store).map_err(to_js_error)
}

/// Load the font from `localStorage`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = loadFromLocalStorage)]
pub fn load_from_local_storage() -> Result<JsValue, JsValue> {
    wasm_info!("loadFromLocalStorage called");
    let store = crate::storage::BrowserStore::open().map_err(to_js_error)?;
    let mut session = lock_session()?;
    let outcome = session.load_from_store(&store).map_err(to_js_error)?;
    command_result(&session, outcome)
}

/// Offer the font as a JSON download
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = downloadFont)]
pub fn download_font() -> Result<(), JsValue> {
    wasm_info!("downloadFont called");
    let mut exchange = crate::storage::BrowserDownload;
    let session = lock_session()?;
    session.export_to(&mut exchange).map_err(to_js_error)
}
