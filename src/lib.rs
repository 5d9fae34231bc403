//! Font Editor WASM Module
//!
//! Session core of a hand-drawn font editor: glyph slots, reusable radicals,
//! a glyph clipboard and registry-wide undo/redo, exported as one JSON
//! document. The drawing canvas and widgets live in the page; they talk to
//! this module through the functions in [`api`].

pub mod models;
pub mod undo;
pub mod clipboard;
pub mod surface;
pub mod storage;
pub mod session;
pub mod api;

// Re-export commonly used types
pub use models::*;
pub use session::{FontSession, LoadKind, LoadTicket};
pub use surface::{Canvas, Point, RasterSurface};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A logger may already be installed when the module is re-initialised
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Font Editor WASM module initialized");
}
