//! Glyph clipboard
//!
//! Holds at most one raster, detached from the slot it came from. Paste
//! reads the content without consuming it, so the same glyph can be pasted
//! into any number of slots until the next copy or cut.
//!
//! The controller mutates the registry it is handed but does not record
//! history; the session does that after an applied cut or paste.

use crate::models::{EditOutcome, NoOpReason, RasterSnapshot, SlotRegistry};

#[derive(Clone, Debug, Default)]
pub struct ClipboardController {
    content: Option<RasterSnapshot>,
}

impl ClipboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raster, overwriting any previous content
    pub fn copy(&mut self, raster: RasterSnapshot) {
        self.content = Some(raster);
        log::info!("Glyph copied");
    }

    /// Copy the glyph of a slot
    pub fn copy_from(&mut self, character: &str, registry: &SlotRegistry) -> EditOutcome {
        match Self::glyph_of(character, registry) {
            Ok(raster) => {
                self.copy(raster);
                EditOutcome::Applied
            }
            Err(reason) => EditOutcome::unchanged(reason, "copy"),
        }
    }

    /// Copy the glyph of a slot and remove the slot
    pub fn cut(&mut self, character: &str, registry: &mut SlotRegistry) -> EditOutcome {
        match Self::glyph_of(character, registry) {
            Ok(raster) => {
                self.content = Some(raster);
                registry.remove_slot(character);
                log::info!("Glyph cut: {}", character);
                EditOutcome::Applied
            }
            Err(reason) => EditOutcome::unchanged(reason, "cut"),
        }
    }

    /// Put the clipboard content into a slot, creating the slot if needed
    pub fn paste(&self, character: &str, registry: &mut SlotRegistry) -> EditOutcome {
        if character.is_empty() {
            return EditOutcome::unchanged(NoOpReason::NoCharacterSelected, "paste");
        }
        match &self.content {
            Some(raster) => {
                registry.set_glyph(character, raster.clone());
                log::info!("Glyph pasted: {}", character);
                EditOutcome::Applied
            }
            None => EditOutcome::unchanged(NoOpReason::ClipboardEmpty, "paste"),
        }
    }

    pub fn content(&self) -> Option<&RasterSnapshot> {
        self.content.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    fn glyph_of(character: &str, registry: &SlotRegistry) -> Result<RasterSnapshot, NoOpReason> {
        if character.is_empty() {
            return Err(NoOpReason::NoCharacterSelected);
        }
        match registry.get_slot(character) {
            None => Err(NoOpReason::SlotMissing),
            Some(slot) => slot.glyph.clone().ok_or(NoOpReason::SlotEmpty),
        }
    }
}
