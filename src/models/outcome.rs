//! Outcomes of editing commands
//!
//! Every session command ends in one of three ways: it was applied, it was a
//! legitimate no-op (with a reason), or it failed with a [`FontError`].
//!
//! [`FontError`]: crate::models::FontError

use serde::{Deserialize, Serialize};

/// Why a command left the session unchanged
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoOpReason {
    /// Command needed a character and got an empty one
    NoCharacterSelected,
    /// Slot already registered
    SlotExists,
    /// Character has no slot
    SlotMissing,
    /// Slot exists but holds no glyph
    SlotEmpty,
    /// Nothing on the clipboard to paste
    ClipboardEmpty,
    /// History cursor is at the first entry
    NothingToUndo,
    /// History cursor is at the tail
    NothingToRedo,
    /// A newer load was started before this one completed
    StaleLoad,
    /// Persistent store has nothing under the document key
    NothingStored,
}

impl NoOpReason {
    pub fn describe(&self) -> &'static str {
        match self {
            NoOpReason::NoCharacterSelected => "No character selected",
            NoOpReason::SlotExists => "Slot already exists",
            NoOpReason::SlotMissing => "Slot not found",
            NoOpReason::SlotEmpty => "Slot has no glyph",
            NoOpReason::ClipboardEmpty => "Clipboard is empty",
            NoOpReason::NothingToUndo => "No undo history available",
            NoOpReason::NothingToRedo => "No redo history available",
            NoOpReason::StaleLoad => "Superseded by a newer load",
            NoOpReason::NothingStored => "No data found in storage",
        }
    }
}

/// Result of a command that did not fail
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum EditOutcome {
    Applied,
    Unchanged(NoOpReason),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }

    /// Log a no-op at info level and pass the outcome through
    pub(crate) fn unchanged(reason: NoOpReason, command: &str) -> Self {
        log::info!("{}: {}", command, reason.describe());
        EditOutcome::Unchanged(reason)
    }
}
