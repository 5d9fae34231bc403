//! Models module for the font editor
//!
//! This module contains the data model of a font under construction:
//! raster snapshots, the slot registry, the radical library and the
//! document that bundles them for persistence.

pub mod config;
pub mod document;
pub mod errors;
pub mod outcome;
pub mod radicals;
pub mod raster;
pub mod slots;

// Re-export commonly used types
pub use config::SessionConfig;
pub use document::FontDocument;
pub use errors::{FontError, Result};
pub use outcome::{EditOutcome, NoOpReason};
pub use radicals::{FragmentDescriptor, RadicalLibrary};
pub use raster::RasterSnapshot;
pub use slots::{Slot, SlotRegistry};
