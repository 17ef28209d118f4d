//! Browser tests, run with `wasm-pack test --headless --firefox client`
#![cfg(target_arch = "wasm32")]

use cb_cards_client::engine::CardGameEngine;
use cb_cards_client::image_data_uri;
use cb_cards_core::config::GameConfig;
use cb_cards_core::types::{CardDraft, Rarity};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const NOW: f64 = 1_704_067_200_000.0;

fn fresh_engine() -> CardGameEngine {
    let mut engine = CardGameEngine::new(JsValue::UNDEFINED, Some(7));
    engine.clear_all(NOW).unwrap();
    engine
}

fn draft(name: &str) -> JsValue {
    let draft = CardDraft {
        image_url: "data:image/png;base64,AAAA".to_string(),
        name: name.to_string(),
        description: "test".to_string(),
        rarity: Rarity::Rare,
    };
    serde_wasm_bindgen::to_value(&draft).unwrap()
}

#[wasm_bindgen_test]
fn image_upload_becomes_data_uri() {
    assert_eq!(
        image_data_uri("image/png", vec![0x89, b'P', b'N', b'G']).unwrap(),
        "data:image/png;base64,iVBORw=="
    );
    assert!(image_data_uri("text/plain", vec![1]).is_err());
}

#[wasm_bindgen_test]
fn cards_survive_a_reload() {
    let mut engine = fresh_engine();
    engine.resume(NOW);
    engine.add_card(draft("Slime"), NOW).unwrap();

    let reloaded = CardGameEngine::new(JsValue::UNDEFINED, Some(7));
    let json = reloaded.export_save(NOW).unwrap();
    assert!(json.contains("\"Slime\""));
    assert!(json.contains("\"Raro\""));
}

#[wasm_bindgen_test]
fn offer_is_picked_up_after_one_interval() {
    let mut engine = fresh_engine();
    engine.resume(NOW);
    engine.add_card(draft("Slime"), NOW).unwrap();

    assert!(engine.pick_up(NOW).is_err());
    assert!(engine.resume(NOW + 300_000.0));
    assert!(engine.pick_up(NOW + 300_000.0).is_ok());
}

#[wasm_bindgen_test]
fn invalid_config_falls_back_to_default() {
    let config = GameConfig {
        spawn_interval_ms: 5,
        ..GameConfig::default()
    };
    let config = serde_wasm_bindgen::to_value(&config).unwrap();
    let mut engine = CardGameEngine::new(config, Some(1));
    engine.clear_all(NOW).unwrap();
    engine.resume(NOW);
    engine.add_card(draft("Slime"), NOW).unwrap();

    // Default five-minute interval, so nothing is due after ten seconds
    assert!(!engine.resume(NOW + 10_000.0));
}

#[wasm_bindgen_test]
fn rejected_import_reports_an_error() {
    let mut engine = fresh_engine();
    let err = engine.import_save("{\"cards\": 3}", NOW).unwrap_err();
    assert!(err.contains("invalid save file"), "{err}");
}
