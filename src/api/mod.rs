//! Font Editor WASM API
//!
//! This module provides the JavaScript-facing API for the font editor.
//! The page owns the canvas and widgets; everything that must stay
//! consistent across commands lives in the one session held here.
//!
//! # Module Structure
//!
//! - `helpers`: Session access, serialization, error conversion and logging
//! - `types`: Plain result shapes returned to JavaScript
//! - `core`: Slot, clipboard, undo/redo and radical commands
//! - `export`: Import/export, asynchronous loads and local storage

pub mod helpers;
pub mod types;
pub mod export;
pub mod core;

// Re-export all public functions from modules to maintain the current public API
pub use self::core::*;
pub use self::export::*;
