use std::collections::BTreeSet;

use super::*;
use crate::error::GameError;
use crate::save::*;
use crate::state::GameState;

fn sample_state() -> GameState {
    GameState {
        cards: sample_catalog(),
        reward_cards: vec![
            create_reward("r1", &[("c1", 2), ("l1", 1)]),
            create_reward("r2", &[("u1", 1)]),
        ],
        deck: create_ledger(&[("c1", 3), ("r2", 1), ("u1", 2)]),
    }
}

#[test]
fn test_export_then_import_round_trip() {
    let state = sample_state();

    let json = export_save(&state, NOW).unwrap();
    let restored = parse_save(&json).unwrap().into_state();

    assert_eq!(restored.cards, state.cards);
    assert_eq!(restored.reward_cards, state.reward_cards);
    let pairs = |s: &GameState| -> BTreeSet<(String, u32)> {
        s.deck.iter().map(|(id, qty)| (id.0.clone(), qty)).collect()
    };
    assert_eq!(pairs(&restored), pairs(&state));
}

#[test]
fn test_export_document_shape() {
    let json = export_save(&sample_state(), NOW + 5).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value["cards"].is_array());
    assert!(value["rewardCards"].is_array());
    assert_eq!(value["deck"][0], serde_json::json!(["c1", 3]));
    assert_eq!(value["timestamp"], "2024-01-01T00:00:00.005Z");
    assert_eq!(value["rewardCards"][0]["requiredCards"][0]["cardId"], "c1");
}

#[test]
fn test_import_accepts_files_from_the_browser_app() {
    let json = r#"{
        "cards": [{"id": "a", "imageUrl": "data:image/png;base64,AA==", "name": "Cat",
                   "description": "Meow", "rarity": "Incomum"}],
        "rewardCards": [{"id": "b", "imageUrl": "", "name": "Toy", "description": "Ball",
                         "requiredCards": [{"cardId": "a", "quantity": 2}]}],
        "deck": [["a", 4]],
        "timestamp": "2024-05-01T10:00:00.000Z"
    }"#;

    let save = parse_save(json).unwrap();

    assert_eq!(save.cards[0].rarity, Rarity::Uncommon);
    assert_eq!(save.deck.quantity(&CardId::from("a")), 4);
    assert_eq!(save.timestamp.as_deref(), Some("2024-05-01T10:00:00.000Z"));
}

#[test]
fn test_import_without_timestamp_is_fine() {
    let save = parse_save(r#"{"cards": [], "rewardCards": [], "deck": []}"#).unwrap();
    assert_eq!(save.timestamp, None);
}

#[test]
fn test_import_rejects_missing_or_non_array_fields() {
    for json in [
        "null",
        "[]",
        r#"{"cards": [], "rewardCards": []}"#,
        r#"{"cards": {}, "rewardCards": [], "deck": []}"#,
        r#"{"cards": [], "rewardCards": "x", "deck": []}"#,
    ] {
        assert!(
            matches!(parse_save(json), Err(GameError::InvalidSaveFile { .. })),
            "accepted {json}"
        );
    }
}

#[test]
fn test_import_rejects_bad_entries() {
    // Not JSON
    assert!(parse_save("{").is_err());
    // Card with unknown rarity
    assert!(parse_save(
        r#"{"cards": [{"id": "a", "imageUrl": "", "name": "n", "description": "d", "rarity": "Mythic"}],
            "rewardCards": [], "deck": []}"#
    )
    .is_err());
    // Deck entry that is not a pair
    assert!(parse_save(r#"{"cards": [], "rewardCards": [], "deck": [{"a": 1}]}"#).is_err());
}

#[test]
fn test_import_rejects_duplicate_ids_and_zero_requirements() {
    let card = r#"{"id": "a", "imageUrl": "", "name": "n", "description": "d", "rarity": "Comum"}"#;
    let duplicate = format!(r#"{{"cards": [{card}, {card}], "rewardCards": [], "deck": []}}"#);
    assert!(matches!(
        parse_save(&duplicate),
        Err(GameError::InvalidSaveFile { reason }) if reason.contains("duplicate")
    ));

    let zero = r#"{"cards": [], "deck": [], "rewardCards": [{"id": "b", "imageUrl": "",
        "name": "n", "description": "d", "requiredCards": [{"cardId": "a", "quantity": 0}]}]}"#;
    assert!(parse_save(zero).is_err());
}

#[test]
fn test_save_file_name_uses_day_month_year() {
    // 2025-01-02T03:04:05Z
    assert_eq!(save_file_name(1_735_787_045_000), "cb_cards_save_02-01-2025.json");
}

#[test]
fn test_iso_timestamp_has_millis_and_z() {
    assert_eq!(iso_timestamp(NOW), "2024-01-01T00:00:00.000Z");
}
