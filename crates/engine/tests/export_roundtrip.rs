//! End-to-end editing and export/import flows through the store.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use worldloom_domain::{ArticleKind, BlockKind, CharacterPatch, EventPatch, WorldPatch};
use worldloom_engine::ports::ClockPort;
use worldloom_engine::{BlockTarget, WorldStore};

struct FixedClock(DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixed_store() -> WorldStore {
    let clock = FixedClock(
        Utc.timestamp_opt(1_700_000_000, 0)
            .single()
            .expect("valid timestamp"),
    );
    WorldStore::new(Arc::new(clock))
}

/// Populate a store the way an editing session would.
fn populated_store() -> WorldStore {
    let mut store = fixed_store();
    store.update_active(WorldPatch {
        name: Some("Verdant Reach".to_string()),
        genre: Some("Solarpunk".to_string()),
        ..Default::default()
    });

    let hero = store.add_character();
    store
        .update_character(
            hero,
            CharacterPatch {
                name: Some("Mara Voss".to_string()),
                role: Some("Arborist".to_string()),
                ..Default::default()
            },
        )
        .expect("update character");
    let rival = store.add_character();
    store.add_relation(hero, rival, "rival").expect("relation");

    let lore = store.add_article(ArticleKind::Lore, Some("Factions"));
    let block = store
        .insert_block(
            BlockTarget::Article(ArticleKind::Lore, lore),
            Some(0),
            BlockKind::Text,
        )
        .expect("insert block");
    store
        .update_block(
            BlockTarget::Article(ArticleKind::Lore, lore),
            block,
            "The Canopy Court rules from the oldest tree.",
        )
        .expect("update block");

    let event = store.add_event().expect("event");
    store
        .update_event(
            event,
            EventPatch {
                year: Some("AE 210".to_string()),
                end_year: Some(Some("AE 215".to_string())),
                title: Some("The Long Bloom".to_string()),
                ..Default::default()
            },
        )
        .expect("update event");

    let map = store.add_map();
    store.add_marker(map, 120.0, 340.0).expect("marker");

    store
}

#[test]
fn export_writes_the_named_file_to_disk() {
    let store = populated_store();
    let dir = tempfile::tempdir().expect("tempdir");

    let path = store.write_export(dir.path()).expect("write");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("Verdant Reach_export.json")
    );
    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.contains("Mara Voss"));
}

#[test]
fn disk_roundtrip_preserves_everything_except_the_id() {
    let mut store = populated_store();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = store.write_export(dir.path()).expect("write");

    let original = serde_json::to_value(store.active()).expect("to value");
    let text = std::fs::read_to_string(&path).expect("read");
    let imported_id = store.import(&text).expect("import");
    let imported = serde_json::to_value(store.active()).expect("to value");

    assert_eq!(store.active().id, imported_id);
    assert_ne!(original["id"], imported["id"]);

    let strip = |mut value: serde_json::Value| {
        if let Some(object) = value.as_object_mut() {
            object.remove("id");
        }
        value
    };
    assert_eq!(strip(original), strip(imported));
}

#[test]
fn editing_session_survives_world_switching() {
    let mut store = populated_store();
    let first = store.active_id();
    let second = store.create_world();

    store.set_active(first).expect("switch back");
    assert_eq!(store.active().name, "Verdant Reach");
    assert_eq!(store.active().characters.len(), 2);

    store.set_active(second).expect("switch");
    assert_eq!(store.active().name, "New World Project");
}

#[test]
fn confirmed_deletion_removes_exactly_one_world() {
    let mut store = populated_store();
    store.create_world();
    let name = store.request_delete_active().expect("prompt");
    assert_eq!(name, "New World Project");
    store.confirm_delete_active(&name).expect("delete");

    assert_eq!(store.worlds().len(), 1);
    assert_eq!(store.active().name, "Verdant Reach");
}
