// Exchange format, persistence and asynchronous load handling through the
// public session API.

use glyph_editor_wasm::storage::{DirectoryStore, DownloadLog, KeyValueStore, MemoryStore};
use glyph_editor_wasm::{
    EditOutcome, FontDocument, FontError, FontSession, LoadKind, NoOpReason, RadicalLibrary,
    RasterSnapshot, SessionConfig, SlotRegistry,
};
use serde_json::{json, Value};

fn raster(width: u32, height: u32, seed: u8) -> RasterSnapshot {
    let pixels = (0..width * height * 4)
        .map(|i| (i as u8).wrapping_mul(seed))
        .collect();
    RasterSnapshot::from_rgba(width, height, pixels).unwrap()
}

fn sample_session() -> FontSession {
    let mut session = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    session.set_glyph("永", raster(3, 2, 7)).unwrap();
    session.add_slot("empty");
    session.set_glyph("B", raster(3, 2, 3)).unwrap();
    session
        .add_radical("mouth", r#"[{"x":0,"y":0,"w":10,"h":10},"stroke"]"#)
        .unwrap();
    session.add_radical("water", "[]").unwrap();
    session
}

#[test]
fn test_round_trip_preserves_slots_and_radicals() {
    let documents = vec![
        FontDocument::default(),
        FontDocument::new(SlotRegistry::new(), RadicalLibrary::parse(br#"{"r":[1,2]}"#).unwrap()),
        sample_session().to_document(),
    ];

    for document in documents {
        let bytes = document.serialize().unwrap();
        let decoded = FontDocument::deserialize(&bytes).unwrap();
        assert_eq!(decoded, document);
        assert_eq!(decoded.slots.list_characters(), document.slots.list_characters());
    }
}

#[test]
fn test_exported_json_shape() {
    let session = sample_session();
    let bytes = session.export_document().unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(value["slots"]["empty"], Value::Null);
    assert_eq!(value["slots"]["永"]["width"], json!(3));
    assert_eq!(value["slots"]["永"]["height"], json!(2));
    assert!(value["slots"]["永"]["rgba"].is_string());
    assert_eq!(value["radicals"]["mouth"][1], json!("stroke"));
    assert_eq!(value["radicals"]["water"], json!([]));

    // insertion order survives in the text itself
    let text = String::from_utf8(bytes).unwrap();
    let first = text.find("永").unwrap();
    let second = text.find("\"empty\"").unwrap();
    let third = text.find("\"B\"").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_import_replaces_state_and_restarts_history() {
    let source = sample_session();
    let bytes = source.export_document().unwrap();

    let mut target = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    target.add_slot("old");
    assert!(target.import_document(&bytes).unwrap().is_applied());

    assert_eq!(target.registry(), source.registry());
    assert_eq!(target.radicals(), source.radicals());
    assert_eq!(target.current_character(), None);
    assert!(!target.can_undo());
    assert!(!target.can_redo());
}

#[test]
fn test_malformed_import_leaves_session_untouched() {
    let mut session = sample_session();
    let registry = session.registry().clone();
    let radicals = session.radicals().clone();
    let history_len = session.history().len();

    let inputs: [&[u8]; 5] = [
        b"not json",
        br#"{"slots": [1, 2]}"#,
        br#"{"slots": {"A": {"width": 3, "height": 2, "rgba": "!!"}}}"#,
        br#"{"radicals": {"r": "not a list"}}"#,
        br#"{"slots": {"A": {"width": 4294967295, "height": 4294967295, "rgba": ""}}}"#,
    ];
    for input in inputs {
        assert!(session.import_document(input).is_err());
        assert_eq!(session.registry(), &registry);
        assert_eq!(session.radicals(), &radicals);
        assert_eq!(session.history().len(), history_len);
    }
}

#[test]
fn test_import_rejects_foreign_canvas_size() {
    let bytes = sample_session().export_document().unwrap();
    let mut session = FontSession::new(SessionConfig::with_canvas_size(4, 4));

    let err = session.import_document(&bytes).unwrap_err();
    assert!(matches!(err, FontError::RasterSizeMismatch { .. }));
    assert!(session.registry().is_empty());
}

#[test]
fn test_store_round_trip_in_memory() {
    let mut store = MemoryStore::new();
    let source = sample_session();
    source.save_to_store(&mut store).unwrap();
    assert!(store.get("fontData").unwrap().is_some());

    let mut target = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    assert!(target.load_from_store(&store).unwrap().is_applied());
    assert_eq!(target.to_document(), source.to_document());
}

#[test]
fn test_store_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::new(dir.path());

    let mut target = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    assert_eq!(
        target.load_from_store(&store).unwrap(),
        EditOutcome::Unchanged(NoOpReason::NothingStored)
    );

    let source = sample_session();
    source.save_to_store(&mut store).unwrap();
    assert!(dir.path().join("fontData.json").exists());

    assert!(target.load_from_store(&store).unwrap().is_applied());
    assert_eq!(target.to_document(), source.to_document());
}

#[test]
fn test_export_download_uses_configured_name() {
    let session = sample_session();
    let mut downloads = DownloadLog::default();
    session.export_to(&mut downloads).unwrap();

    assert_eq!(downloads.files.len(), 1);
    let (name, bytes) = &downloads.files[0];
    assert_eq!(name, "font.json");
    assert_eq!(bytes, &session.export_document().unwrap());
}

#[test]
fn test_out_of_order_loads_keep_latest_result() {
    let older = sample_session().export_document().unwrap();
    let newer = FontDocument::default().serialize().unwrap();

    let mut session = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    let first = session.begin_load(LoadKind::Document);
    let second = session.begin_load(LoadKind::Document);

    assert!(session.complete_load(second, &newer).unwrap().is_applied());
    assert_eq!(
        session.complete_load(first, &older).unwrap(),
        EditOutcome::Unchanged(NoOpReason::StaleLoad)
    );
    assert!(session.registry().is_empty());
}

#[test]
fn test_older_load_of_another_kind_is_dropped() {
    let mut session = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    let radicals = session.begin_load(LoadKind::Radicals);
    let document = session.begin_load(LoadKind::Document);

    assert!(session
        .complete_load(document, br#"{"slots": null, "radicals": {"fromDoc": [1]}}"#)
        .unwrap()
        .is_applied());
    assert_eq!(
        session.complete_load(radicals, br#"{"stale": [0]}"#).unwrap(),
        EditOutcome::Unchanged(NoOpReason::StaleLoad)
    );
    assert_eq!(session.list_radicals(), vec!["fromDoc"]);
}

#[test]
fn test_import_while_load_pending_wins() {
    let older = sample_session().export_document().unwrap();
    let mut session = FontSession::new(SessionConfig::with_canvas_size(3, 2));
    let pending = session.begin_load(LoadKind::Document);

    session.import_document(br#"{"slots": {"newer": null}}"#).unwrap();
    assert_eq!(
        session.complete_load(pending, &older).unwrap(),
        EditOutcome::Unchanged(NoOpReason::StaleLoad)
    );
    assert_eq!(session.list_characters(), vec!["newer"]);
}

#[test]
fn test_radical_loads_from_both_sources() {
    let font = sample_session().export_document().unwrap();
    let mut session = FontSession::new(SessionConfig::with_canvas_size(3, 2));

    let from_font = session.begin_load(LoadKind::RadicalsFromDocument);
    assert!(session.complete_load(from_font, &font).unwrap().is_applied());
    assert_eq!(session.list_radicals(), vec!["mouth", "water"]);
    assert!(session.registry().is_empty());

    let bare = session.begin_load(LoadKind::Radicals);
    assert!(session
        .complete_load(bare, br#"{"tree": [{"x": 1}]}"#)
        .unwrap()
        .is_applied());
    assert_eq!(session.list_radicals(), vec!["tree"]);

    let broken = session.begin_load(LoadKind::Radicals);
    assert!(session.complete_load(broken, b"[1, 2]").is_err());
    assert_eq!(session.list_radicals(), vec!["tree"]);
}
