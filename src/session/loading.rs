//! Document import/export, persistence and asynchronous loads
//!
//! Reads from the host (file picker, storage) complete asynchronously. A
//! caller takes a [`LoadTicket`] before starting the read and hands it back
//! with the bytes. Only the most recently issued ticket may apply its result,
//! and only if nothing has replaced the font or radicals since it was issued;
//! late completions of older reads are dropped.

use serde::{Deserialize, Serialize};

use super::FontSession;
use crate::models::{EditOutcome, FontDocument, NoOpReason, Result};
use crate::storage::{FileExchange, KeyValueStore};

/// What an asynchronous load will replace
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LoadKind {
    /// Whole font document (slots and radicals)
    Document,
    /// Radical library from a bare name → fragments mapping
    Radicals,
    /// Radical library from the `radicals` field of a font file
    RadicalsFromDocument,
}

/// Handle for one in-flight load
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub id: u64,
    pub kind: LoadKind,
}

/// Issues monotonic ticket ids and remembers the one that may still apply.
///
/// Every load replaces radicals, so one latest id covers all kinds.
#[derive(Debug, Default)]
pub(super) struct LoadTracker {
    next_id: u64,
    latest: Option<u64>,
}

impl LoadTracker {
    fn issue(&mut self, kind: LoadKind) -> LoadTicket {
        self.next_id += 1;
        self.latest = Some(self.next_id);
        LoadTicket { id: self.next_id, kind }
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.latest == Some(ticket.id)
    }

    /// Invalidate every ticket issued so far
    pub(super) fn supersede(&mut self) {
        if let Some(id) = self.latest.take() {
            log::debug!("Load #{} superseded", id);
        }
    }
}

impl FontSession {
    /// Snapshot of the current slots and radicals
    pub fn to_document(&self) -> FontDocument {
        FontDocument::new(self.registry.clone(), self.radicals.clone())
    }

    /// Encode the whole font as exchange-format JSON
    pub fn export_document(&self) -> Result<Vec<u8>> {
        self.to_document().serialize()
    }

    /// Replace slots and radicals from exchange-format JSON.
    ///
    /// The document is parsed and checked completely before anything is
    /// swapped in; on error the session is untouched. History restarts from
    /// the loaded state.
    pub fn import_document(&mut self, bytes: &[u8]) -> Result<EditOutcome> {
        let document = FontDocument::deserialize(bytes)?;
        document.check_raster_size(self.config.canvas_width, self.config.canvas_height)?;

        log::info!(
            "Font imported: {} slots, {} radicals",
            document.slots.len(),
            document.radicals.len()
        );
        self.registry = document.slots;
        self.radicals = document.radicals;
        self.current_char = None;
        self.reset_history();
        self.loads.supersede();
        Ok(EditOutcome::Applied)
    }

    /// Save the whole document under the configured key
    pub fn save_to_store(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let bytes = self.export_document()?;
        store.set(&self.config.storage_key, &bytes)?;
        log::info!("Data saved to storage ({} bytes)", bytes.len());
        Ok(())
    }

    /// Load the whole document from the configured key
    pub fn load_from_store(&mut self, store: &dyn KeyValueStore) -> Result<EditOutcome> {
        match store.get(&self.config.storage_key)? {
            Some(bytes) => self.import_document(&bytes),
            None => Ok(EditOutcome::unchanged(NoOpReason::NothingStored, "load")),
        }
    }

    /// Offer the document as a download under the configured file name
    pub fn export_to(&self, exchange: &mut dyn FileExchange) -> Result<()> {
        let bytes = self.export_document()?;
        exchange.offer_download(&self.config.export_file_name, &bytes)
    }

    /// Take a ticket before starting an asynchronous read
    pub fn begin_load(&mut self, kind: LoadKind) -> LoadTicket {
        let ticket = self.loads.issue(kind);
        log::debug!("Load #{} started ({:?})", ticket.id, kind);
        ticket
    }

    /// Apply the bytes of a finished read if its ticket is still the latest
    pub fn complete_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> Result<EditOutcome> {
        if !self.loads.is_current(&ticket) {
            log::warn!("Load #{} ({:?}) superseded, result dropped", ticket.id, ticket.kind);
            return Ok(EditOutcome::Unchanged(NoOpReason::StaleLoad));
        }
        self.loads.supersede();

        match ticket.kind {
            LoadKind::Document => self.import_document(bytes),
            LoadKind::Radicals => self.load_radicals(bytes).map(|_| EditOutcome::Applied),
            LoadKind::RadicalsFromDocument => self
                .load_radicals_from_document(bytes)
                .map(|_| EditOutcome::Applied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FontError, RasterSnapshot, SessionConfig};
    use crate::storage::{DownloadLog, MemoryStore};

    fn session() -> FontSession {
        FontSession::new(SessionConfig::with_canvas_size(1, 1))
    }

    fn raster(value: u8) -> RasterSnapshot {
        RasterSnapshot::from_rgba(1, 1, vec![value, 0, 0, 255]).unwrap()
    }

    fn populated() -> FontSession {
        let mut session = session();
        session.add_slot("空");
        session.set_glyph("A", raster(1)).unwrap();
        session.add_radical("roof", r#"[{"x": 1}]"#).unwrap();
        session
    }

    #[test]
    fn test_export_import_round_trip() {
        let source = populated();
        let bytes = source.export_document().unwrap();

        let mut target = session();
        assert!(target.import_document(&bytes).unwrap().is_applied());
        assert_eq!(target.to_document(), source.to_document());
        assert_eq!(target.history().len(), 1);
        assert!(!target.can_undo());
    }

    #[test]
    fn test_malformed_import_leaves_state() {
        let mut session = populated();
        let before = session.to_document();
        let history_len = session.history().len();

        assert!(session.import_document(b"{\"slots\": 3}").is_err());
        assert_eq!(session.to_document(), before);
        assert_eq!(session.history().len(), history_len);
    }

    #[test]
    fn test_import_rejects_other_canvas_size() {
        let other = {
            let mut s = FontSession::new(SessionConfig::with_canvas_size(2, 1));
            s.set_glyph("A", RasterSnapshot::blank(2, 1).unwrap()).unwrap();
            s.export_document().unwrap()
        };
        let mut session = populated();
        let before = session.to_document();
        assert!(matches!(
            session.import_document(&other),
            Err(FontError::RasterSizeMismatch { .. })
        ));
        assert_eq!(session.to_document(), before);
    }

    #[test]
    fn test_store_save_and_load() {
        let mut store = MemoryStore::new();
        let mut empty = session();
        assert_eq!(
            empty.load_from_store(&store).unwrap(),
            EditOutcome::Unchanged(NoOpReason::NothingStored)
        );

        let source = populated();
        source.save_to_store(&mut store).unwrap();
        assert!(store.get("fontData").unwrap().is_some());

        assert!(empty.load_from_store(&store).unwrap().is_applied());
        assert_eq!(empty.to_document(), source.to_document());
    }

    #[test]
    fn test_export_offers_font_json() {
        let session = populated();
        let mut downloads = DownloadLog::default();
        session.export_to(&mut downloads).unwrap();
        assert_eq!(downloads.files.len(), 1);
        assert_eq!(downloads.files[0].0, "font.json");
        assert_eq!(downloads.files[0].1, session.export_document().unwrap());
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let first_doc = populated().export_document().unwrap();
        let second_doc = {
            let mut s = session();
            s.add_slot("late");
            s.export_document().unwrap()
        };

        let mut session = session();
        let first = session.begin_load(LoadKind::Document);
        let second = session.begin_load(LoadKind::Document);

        assert!(session.complete_load(second, &second_doc).unwrap().is_applied());
        assert_eq!(
            session.complete_load(first, &first_doc).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );
        assert_eq!(session.list_characters(), vec!["late"]);

        // a ticket applies at most once
        assert_eq!(
            session.complete_load(second, &first_doc).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );
    }

    #[test]
    fn test_newer_document_load_supersedes_older_radicals_load() {
        let mut session = session();
        let radicals = session.begin_load(LoadKind::Radicals);
        let doc = session.begin_load(LoadKind::Document);

        assert!(session
            .complete_load(doc, br#"{"slots": {"B": null}, "radicals": {"fromDoc": [1]}}"#)
            .unwrap()
            .is_applied());
        assert_eq!(
            session.complete_load(radicals, br#"{"stale": [0]}"#).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );
        assert_eq!(session.list_characters(), vec!["B"]);
        assert_eq!(session.list_radicals(), vec!["fromDoc"]);
    }

    #[test]
    fn test_newer_radicals_load_supersedes_older_document_load() {
        let mut session = session();
        let doc = session.begin_load(LoadKind::Document);
        let radicals = session.begin_load(LoadKind::RadicalsFromDocument);

        assert!(session
            .complete_load(radicals, br#"{"radicals": {"tree": [1]}}"#)
            .unwrap()
            .is_applied());
        assert_eq!(
            session
                .complete_load(doc, br#"{"slots": {"B": null}, "radicals": {"old": []}}"#)
                .unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );
        assert!(session.list_characters().is_empty());
        assert_eq!(session.list_radicals(), vec!["tree"]);
    }

    #[test]
    fn test_synchronous_replacements_supersede_pending_loads() {
        let older = {
            let mut s = session();
            s.add_slot("older");
            s.export_document().unwrap()
        };
        let newer = {
            let mut s = session();
            s.add_slot("newer");
            s.export_document().unwrap()
        };

        let mut session = session();
        let ticket = session.begin_load(LoadKind::Document);
        session.import_document(&newer).unwrap();
        assert_eq!(
            session.complete_load(ticket, &older).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );
        assert_eq!(session.list_characters(), vec!["newer"]);

        let mut store = MemoryStore::new();
        store.set("fontData", &newer).unwrap();
        let ticket = session.begin_load(LoadKind::Document);
        session.load_from_store(&store).unwrap();
        assert_eq!(
            session.complete_load(ticket, &older).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );

        let ticket = session.begin_load(LoadKind::Document);
        session.load_radicals(br#"{"sun": []}"#).unwrap();
        assert_eq!(
            session.complete_load(ticket, &older).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );

        let ticket = session.begin_load(LoadKind::Radicals);
        session.new_document();
        assert_eq!(
            session.complete_load(ticket, br#"{"x": []}"#).unwrap(),
            EditOutcome::Unchanged(NoOpReason::StaleLoad)
        );
        assert!(session.list_radicals().is_empty());
    }

    #[test]
    fn test_failed_replacement_keeps_pending_load() {
        let mut session = session();
        let ticket = session.begin_load(LoadKind::Radicals);
        assert!(session.import_document(b"not json").is_err());
        assert!(session
            .complete_load(ticket, br#"{"tree": []}"#)
            .unwrap()
            .is_applied());
    }

    #[test]
    fn test_failed_load_reports_error() {
        let mut session = populated();
        let ticket = session.begin_load(LoadKind::RadicalsFromDocument);
        assert!(session.complete_load(ticket, b"oops").is_err());
        assert_eq!(session.list_radicals(), vec!["roof"]);
    }
}
