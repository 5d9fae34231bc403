//! WASM API for slot, clipboard, history and radical commands
//!
//! Every function locks the session, runs exactly one command and returns.
//! Boundary conditions come back as an `unchanged` outcome, never as an
//! exception; only malformed input rejects.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{
    deserialize, lock_session, raster_from_js, serialize, to_js_error, validate_character,
    validation_error,
};
use crate::api::types::{CommandResult, GlyphData, HistoryStatus};
use crate::models::{EditOutcome, SessionConfig};
use crate::session::FontSession;
use crate::{wasm_info, wasm_log};

/// Bundle an outcome with the refreshed slot list and history status
pub(crate) fn command_result(session: &FontSession, outcome: EditOutcome) -> Result<JsValue, JsValue> {
    let history = session.history();
    let result = CommandResult {
        outcome,
        characters: session.list_characters(),
        current_character: session.current_character().map(str::to_string),
        history: HistoryStatus {
            can_undo: history.can_undo(),
            can_redo: history.can_redo(),
            undo_count: history.undo_count(),
            redo_count: history.redo_count(),
        },
    };
    serialize(&result, "CommandResult serialization error")
}

// ============================================================================
// Session lifecycle
// ============================================================================

/// Replace the session with a fresh one using the given config.
///
/// `config_js` may be `undefined` or a partial `{canvasWidth, canvasHeight, ...}`
/// object; missing fields take their defaults.
#[wasm_bindgen(js_name = createFontSession)]
pub fn create_font_session(config_js: JsValue) -> Result<JsValue, JsValue> {
    let config: SessionConfig = if config_js.is_undefined() || config_js.is_null() {
        SessionConfig::default()
    } else {
        deserialize(config_js, "SessionConfig deserialization error")?
    };
    wasm_info!(
        "createFontSession: canvas {}x{}",
        config.canvas_width,
        config.canvas_height
    );

    let mut session = lock_session()?;
    *session = FontSession::new(config);
    serialize(session.config(), "SessionConfig serialization error")
}

/// Start a new empty font in the current session
#[wasm_bindgen(js_name = newDocument)]
pub fn new_document() -> Result<JsValue, JsValue> {
    wasm_info!("newDocument called");
    let mut session = lock_session()?;
    session.new_document();
    command_result(&session, EditOutcome::Applied)
}

// ============================================================================
// Slots
// ============================================================================

#[wasm_bindgen(js_name = selectCharacter)]
pub fn select_character(character: &str) -> Result<JsValue, JsValue> {
    validate_character(character).map_err(validation_error)?;
    let mut session = lock_session()?;
    let outcome = session.select_character(character);
    command_result(&session, outcome)
}

#[wasm_bindgen(js_name = addSlot)]
pub fn add_slot(character: &str) -> Result<JsValue, JsValue> {
    wasm_info!("addSlot: {:?}", character);
    validate_character(character).map_err(validation_error)?;
    let mut session = lock_session()?;
    let outcome = session.add_slot(character);
    command_result(&session, outcome)
}

/// Store canvas pixels (`ImageData.data`) as the glyph of `character`
#[wasm_bindgen(js_name = saveGlyph)]
pub fn save_glyph(character: &str, width: u32, height: u32, rgba: Vec<u8>) -> Result<JsValue, JsValue> {
    wasm_info!("saveGlyph: {:?} ({}x{})", character, width, height);
    validate_character(character).map_err(validation_error)?;
    let raster = raster_from_js(width, height, rgba)?;
    let mut session = lock_session()?;
    let outcome = session.set_glyph(character, raster).map_err(to_js_error)?;
    command_result(&session, outcome)
}

/// Glyph pixels of `character`, or `null` for an empty or unknown slot
#[wasm_bindgen(js_name = getGlyph)]
pub fn get_glyph(character: &str) -> Result<JsValue, JsValue> {
    let session = lock_session()?;
    match session.get_glyph(character) {
        Some(raster) => serialize(&GlyphData::from(raster), "GlyphData serialization error"),
        None => {
            wasm_log!("getGlyph: no glyph for {:?}", character);
            Ok(JsValue::NULL)
        }
    }
}

#[wasm_bindgen(js_name = removeSlot)]
pub fn remove_slot(character: &str) -> Result<JsValue, JsValue> {
    wasm_info!("removeSlot: {:?}", character);
    let mut session = lock_session()?;
    let outcome = session.remove_slot(character);
    command_result(&session, outcome)
}

#[wasm_bindgen(js_name = listCharacters)]
pub fn list_characters() -> Result<JsValue, JsValue> {
    let session = lock_session()?;
    serialize(&session.list_characters(), "Character list serialization error")
}

// ============================================================================
// Clipboard
// ============================================================================

#[wasm_bindgen(js_name = copyGlyph)]
pub fn copy_glyph(character: &str) -> Result<JsValue, JsValue> {
    wasm_info!("copyGlyph: {:?}", character);
    let mut session = lock_session()?;
    let outcome = session.copy_glyph(character);
    command_result(&session, outcome)
}

/// Copy raw canvas pixels without going through a slot
#[wasm_bindgen(js_name = copyPixels)]
pub fn copy_pixels(width: u32, height: u32, rgba: Vec<u8>) -> Result<JsValue, JsValue> {
    wasm_info!("copyPixels: {}x{}", width, height);
    let raster = raster_from_js(width, height, rgba)?;
    let mut session = lock_session()?;
    let outcome = session.copy(raster).map_err(to_js_error)?;
    command_result(&session, outcome)
}

#[wasm_bindgen(js_name = cutGlyph)]
pub fn cut_glyph(character: &str) -> Result<JsValue, JsValue> {
    wasm_info!("cutGlyph: {:?}", character);
    let mut session = lock_session()?;
    let outcome = session.cut(character);
    command_result(&session, outcome)
}

#[wasm_bindgen(js_name = pasteGlyph)]
pub fn paste_glyph(character: &str) -> Result<JsValue, JsValue> {
    wasm_info!("pasteGlyph: {:?}", character);
    validate_character(character).map_err(validation_error)?;
    let mut session = lock_session()?;
    let outcome = session.paste(character);
    command_result(&session, outcome)
}

/// Clipboard pixels, or `null` when empty
#[wasm_bindgen(js_name = getClipboard)]
pub fn get_clipboard() -> Result<JsValue, JsValue> {
    let session = lock_session()?;
    match session.clipboard().content() {
        Some(raster) => serialize(&GlyphData::from(raster), "GlyphData serialization error"),
        None => Ok(JsValue::NULL),
    }
}

// ============================================================================
// Undo/Redo operations
// ============================================================================

#[wasm_bindgen(js_name = undo)]
pub fn undo() -> Result<JsValue, JsValue> {
    wasm_info!("undo called");
    let mut session = lock_session()?;
    let outcome = session.undo();
    command_result(&session, outcome)
}

#[wasm_bindgen(js_name = redo)]
pub fn redo() -> Result<JsValue, JsValue> {
    wasm_info!("redo called");
    let mut session = lock_session()?;
    let outcome = session.redo();
    command_result(&session, outcome)
}

#[wasm_bindgen(js_name = canUndo)]
pub fn can_undo() -> Result<bool, JsValue> {
    Ok(lock_session()?.can_undo())
}

#[wasm_bindgen(js_name = canRedo)]
pub fn can_redo() -> Result<bool, JsValue> {
    Ok(lock_session()?.can_redo())
}

// ============================================================================
// Radicals
// ============================================================================

/// Replace the radical library from a JSON `{name: [fragments]}` text
#[wasm_bindgen(js_name = loadRadicals)]
pub fn load_radicals(json: &str) -> Result<usize, JsValue> {
    wasm_info!("loadRadicals: {} bytes", json.len());
    let mut session = lock_session()?;
    session.load_radicals(json.as_bytes()).map_err(to_js_error)
}

#[wasm_bindgen(js_name = addRadical)]
pub fn add_radical(name: &str, fragments_json: &str) -> Result<(), JsValue> {
    wasm_info!("addRadical: {:?}", name);
    let mut session = lock_session()?;
    session.add_radical(name, fragments_json).map_err(to_js_error)
}

#[wasm_bindgen(js_name = listRadicals)]
pub fn list_radicals() -> Result<JsValue, JsValue> {
    let session = lock_session()?;
    serialize(&session.list_radicals(), "Radical list serialization error")
}

/// Fragment list of one radical, or `null` if unknown
#[wasm_bindgen(js_name = getRadical)]
pub fn get_radical(name: &str) -> Result<JsValue, JsValue> {
    let session = lock_session()?;
    match session.radicals().get(name) {
        Some(fragments) => serialize(&fragments, "Radical serialization error"),
        None => Ok(JsValue::NULL),
    }
}
