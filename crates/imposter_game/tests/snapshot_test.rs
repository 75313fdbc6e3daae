//! Tests for the persisted snapshot format.

use imposter_game::{CategoryKey, CategorySelection, Player, PlayerId, Roster, Snapshot};
use serde_json::json;

fn sample() -> Snapshot {
    let players = vec![
        Player::new(PlayerId::new("1"), "Ali").expect("Valid"),
        Player::new(PlayerId::new("2"), "Sara").expect("Valid"),
        Player::new(PlayerId::new("3"), "Omar").expect("Valid"),
    ];
    let mut categories = CategorySelection::all_enabled();
    categories.set(CategoryKey::Food, false);
    Snapshot::new(categories, Roster::from_players(players))
}

#[test]
fn test_round_trip_preserves_roster_and_categories() {
    let snapshot = sample();
    let restored = Snapshot::from_json_or_default(&snapshot.to_json());
    assert_eq!(restored, snapshot);

    let strict: Snapshot = serde_json::from_str(&snapshot.to_json()).expect("Valid document");
    assert_eq!(strict, snapshot);
}

#[test]
fn test_stored_shape() {
    let value: serde_json::Value =
        serde_json::from_str(&sample().to_json()).expect("Valid JSON");
    assert_eq!(value["players"][0], json!({"id": "1", "name": "Ali"}));
    assert_eq!(value["players"][2]["name"], json!("Omar"));
    assert_eq!(value["selectedCategories"]["places"], json!(true));
    assert_eq!(value["selectedCategories"]["food"], json!(false));
    assert_eq!(value["selectedCategories"]["quran_chapters"], json!(true));
}

#[test]
fn test_corrupt_document_yields_defaults() {
    for raw in ["", "not json", "[1,2,3]", "{\"players\": "] {
        let snapshot = Snapshot::from_json_or_default(raw);
        assert_eq!(snapshot, Snapshot::default(), "input {:?}", raw);
        assert!(snapshot.players().is_empty());
        assert_eq!(snapshot.selected_categories().enabled_keys().len(), 10);
    }
}

#[test]
fn test_fields_fall_back_independently() {
    let raw = json!({
        "selectedCategories": {"anime": false},
        "players": "not a list"
    })
    .to_string();
    let snapshot = Snapshot::from_json_or_default(&raw);
    assert!(snapshot.players().is_empty());
    assert!(!snapshot.selected_categories().is_enabled(CategoryKey::Anime));
    assert!(snapshot.selected_categories().is_enabled(CategoryKey::Places));

    let raw = json!({
        "selectedCategories": {"made_up": true},
        "players": [{"id": "7", "name": "Huda"}]
    })
    .to_string();
    let snapshot = Snapshot::from_json_or_default(&raw);
    assert_eq!(snapshot.players().len(), 1);
    assert_eq!(*snapshot.selected_categories(), CategorySelection::all_enabled());
}

#[test]
fn test_stored_players_are_sanitized() {
    let raw = json!({
        "players": [
            {"id": "1", "name": "Ali"},
            {"id": "1", "name": "Ali again"},
            {"id": "2", "name": "   "},
            {"id": "3", "name": " Omar "}
        ]
    })
    .to_string();
    let snapshot = Snapshot::from_json_or_default(&raw);
    let names: Vec<&str> = snapshot
        .players()
        .players()
        .iter()
        .map(|p| p.name().as_str())
        .collect();
    assert_eq!(names, vec!["Ali", "Omar"]);
}

#[test]
fn test_unknown_stored_category_keeps_other_flags() {
    let raw = json!({
        "selectedCategories": {"anime": false, "food": false, "legacy": true},
        "players": []
    })
    .to_string();
    let snapshot = Snapshot::from_json_or_default(&raw);
    let selection = snapshot.selected_categories();
    assert!(!selection.is_enabled(CategoryKey::Anime));
    assert!(!selection.is_enabled(CategoryKey::Food));
    assert_eq!(selection.enabled_keys().len(), 8);
}
