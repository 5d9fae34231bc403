//! Font editing session
//!
//! [`FontSession`] owns every piece of mutable editor state: the slot
//! registry, its history, the clipboard, the radical library and the
//! currently selected character. Each user command is one method call that
//! runs to completion; registry-mutating commands record the resulting
//! registry in the history before returning.
//!
//! A session always starts from a baseline history entry (the empty font,
//! or the document just loaded), so the first user action can be undone.

mod loading;

pub use loading::{LoadKind, LoadTicket};

use crate::clipboard::ClipboardController;
use crate::models::{
    EditOutcome, FontError, NoOpReason, RadicalLibrary, RasterSnapshot, Result, SessionConfig,
    SlotRegistry,
};
use crate::surface::RasterSurface;
use crate::undo::{ActionType, HistoryManager};

pub struct FontSession {
    config: SessionConfig,
    registry: SlotRegistry,
    history: HistoryManager,
    clipboard: ClipboardController,
    radicals: RadicalLibrary,
    current_char: Option<String>,
    loads: loading::LoadTracker,
}

impl Default for FontSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl FontSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Self {
            config,
            registry: SlotRegistry::new(),
            history: HistoryManager::new(),
            clipboard: ClipboardController::new(),
            radicals: RadicalLibrary::new(),
            current_char: None,
            loads: loading::LoadTracker::default(),
        };
        session.reset_history();
        session
    }

    /// Start over with an empty font. The clipboard and config survive.
    pub fn new_document(&mut self) {
        self.registry = SlotRegistry::new();
        self.radicals = RadicalLibrary::new();
        self.current_char = None;
        self.reset_history();
        self.loads.supersede();
        log::info!("New font document");
    }

    fn reset_history(&mut self) {
        self.history.clear();
        self.history
            .record(ActionType::Baseline, self.registry.clone());
    }

    fn record(&mut self, action_type: ActionType) {
        self.history.record(action_type, self.registry.clone());
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn clipboard(&self) -> &ClipboardController {
        &self.clipboard
    }

    pub fn radicals(&self) -> &RadicalLibrary {
        &self.radicals
    }

    pub fn current_character(&self) -> Option<&str> {
        self.current_char.as_deref()
    }

    // ------------------------------------------------------------------
    // Slots
    // ------------------------------------------------------------------

    /// Make `character` the target of surface commits
    pub fn select_character(&mut self, character: &str) -> EditOutcome {
        if character.is_empty() {
            return EditOutcome::unchanged(NoOpReason::NoCharacterSelected, "select");
        }
        self.current_char = Some(character.to_string());
        EditOutcome::Applied
    }

    /// Register an empty slot and select it
    pub fn add_slot(&mut self, character: &str) -> EditOutcome {
        if character.is_empty() {
            return EditOutcome::unchanged(NoOpReason::NoCharacterSelected, "addSlot");
        }
        self.current_char = Some(character.to_string());
        if !self.registry.add_slot(character) {
            return EditOutcome::unchanged(NoOpReason::SlotExists, "addSlot");
        }
        self.record(ActionType::AddSlot);
        log::info!("Slot added: {}", character);
        EditOutcome::Applied
    }

    /// Store a glyph for `character`, creating its slot if needed
    pub fn set_glyph(&mut self, character: &str, raster: RasterSnapshot) -> Result<EditOutcome> {
        if character.is_empty() {
            return Ok(EditOutcome::unchanged(NoOpReason::NoCharacterSelected, "setGlyph"));
        }
        self.check_size(&raster)?;
        self.registry.set_glyph(character, raster);
        self.record(ActionType::SetGlyph);
        log::info!("Glyph saved: {}", character);
        Ok(EditOutcome::Applied)
    }

    /// Commit the surface into the selected character's slot and clear it
    pub fn commit_surface(&mut self, surface: &mut dyn RasterSurface) -> Result<EditOutcome> {
        let Some(character) = self.current_char.clone() else {
            return Ok(EditOutcome::unchanged(NoOpReason::NoCharacterSelected, "saveGlyph"));
        };
        let outcome = self.set_glyph(&character, surface.snapshot())?;
        if outcome.is_applied() {
            surface.clear();
        }
        Ok(outcome)
    }

    /// Put a slot's glyph back on the surface for editing and select it
    pub fn edit_glyph(&mut self, character: &str, surface: &mut dyn RasterSurface) -> Result<EditOutcome> {
        let raster = match self.registry.get_slot(character) {
            None => return Ok(EditOutcome::unchanged(NoOpReason::SlotMissing, "editGlyph")),
            Some(slot) => match &slot.glyph {
                None => return Ok(EditOutcome::unchanged(NoOpReason::SlotEmpty, "editGlyph")),
                Some(raster) => raster.clone(),
            },
        };
        surface.restore(&raster)?;
        self.current_char = Some(character.to_string());
        log::info!("Glyph loaded for editing: {}", character);
        Ok(EditOutcome::Applied)
    }

    pub fn remove_slot(&mut self, character: &str) -> EditOutcome {
        if self.registry.remove_slot(character).is_none() {
            return EditOutcome::unchanged(NoOpReason::SlotMissing, "removeSlot");
        }
        self.deselect(character);
        self.record(ActionType::RemoveSlot);
        log::info!("Slot removed: {}", character);
        EditOutcome::Applied
    }

    pub fn get_glyph(&self, character: &str) -> Option<&RasterSnapshot> {
        self.registry.get_glyph(character)
    }

    pub fn list_characters(&self) -> Vec<String> {
        self.registry.list_characters()
    }

    fn deselect(&mut self, character: &str) {
        if self.current_char.as_deref() == Some(character) {
            self.current_char = None;
        }
    }

    fn check_size(&self, raster: &RasterSnapshot) -> Result<()> {
        if raster.width() != self.config.canvas_width || raster.height() != self.config.canvas_height {
            return Err(FontError::RasterSizeMismatch {
                expected_width: self.config.canvas_width,
                expected_height: self.config.canvas_height,
                actual_width: raster.width(),
                actual_height: raster.height(),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copy an arbitrary raster, e.g. the current surface
    pub fn copy(&mut self, raster: RasterSnapshot) -> Result<EditOutcome> {
        self.check_size(&raster)?;
        self.clipboard.copy(raster);
        Ok(EditOutcome::Applied)
    }

    /// Copy the glyph of a slot
    pub fn copy_glyph(&mut self, character: &str) -> EditOutcome {
        self.clipboard.copy_from(character, &self.registry)
    }

    pub fn cut(&mut self, character: &str) -> EditOutcome {
        let outcome = self.clipboard.cut(character, &mut self.registry);
        if outcome.is_applied() {
            self.deselect(character);
            self.record(ActionType::Cut);
        }
        outcome
    }

    pub fn paste(&mut self, character: &str) -> EditOutcome {
        let outcome = self.clipboard.paste(character, &mut self.registry);
        if outcome.is_applied() {
            self.record(ActionType::Paste);
        }
        outcome
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> EditOutcome {
        match self.history.undo() {
            Some(entry) => {
                self.registry = entry.state().clone();
                log::info!("Undo performed");
                EditOutcome::Applied
            }
            None => EditOutcome::unchanged(NoOpReason::NothingToUndo, "undo"),
        }
    }

    pub fn redo(&mut self) -> EditOutcome {
        match self.history.redo() {
            Some(entry) => {
                self.registry = entry.state().clone();
                log::info!("Redo performed");
                EditOutcome::Applied
            }
            None => EditOutcome::unchanged(NoOpReason::NothingToRedo, "redo"),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Radicals
    // ------------------------------------------------------------------

    /// Replace the radical library from a JSON name → fragments mapping
    pub fn load_radicals(&mut self, data: &[u8]) -> Result<usize> {
        let count = self.radicals.load(data)?;
        self.loads.supersede();
        Ok(count)
    }

    /// Replace the radical library from the `radicals` field of a font file
    pub fn load_radicals_from_document(&mut self, data: &[u8]) -> Result<usize> {
        let count = self.radicals.load_from_document(data)?;
        self.loads.supersede();
        Ok(count)
    }

    pub fn add_radical(&mut self, name: &str, fragments: &str) -> Result<()> {
        self.radicals.add(name, fragments)
    }

    pub fn list_radicals(&self) -> Vec<String> {
        self.radicals.list()
    }
}
