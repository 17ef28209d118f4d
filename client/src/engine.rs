//! Game engine for browser WASM builds
//!
//! This module provides the card game engine exposed to JavaScript via wasm-bindgen.
//! Timestamps cross the boundary as `Date.now()` milliseconds.

use cb_cards_core::config::GameConfig;
use cb_cards_core::engine::Game;
use cb_cards_core::log;
use cb_cards_core::rng::XorShiftRng;
use cb_cards_core::types::{CardDraft, CardId, RewardCardDraft};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorage;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(value).map_err(|e| format!("Failed to serialize: {:?}", e))
}

fn entropy_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(e) => {
            log::warn(&format!("No entropy source ({}), using the clock", e));
            clock_ms() as u64
        }
    }
}

fn clock_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.time_origin() + performance.now())
        .unwrap_or(1.0)
}

/// The main game engine exposed to WASM
#[wasm_bindgen]
pub struct CardGameEngine {
    game: Game<LocalStorage, XorShiftRng>,
}

#[wasm_bindgen]
impl CardGameEngine {
    /// Load the saved session. `config` may be undefined; `seed` fixes the RNG for tests
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, seed: Option<u64>) -> Self {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            match serde_wasm_bindgen::from_value::<GameConfig>(config)
                .map_err(|e| e.to_string())
                .and_then(|config| config.validate().map(|()| config).map_err(|e| e.to_string()))
            {
                Ok(config) => config,
                Err(e) => {
                    log::warn(&format!("Ignoring config: {}", e));
                    GameConfig::default()
                }
            }
        };

        let rng = XorShiftRng::seed_from_u64(seed.unwrap_or_else(entropy_seed));
        Self {
            game: Game::load(config, LocalStorage::open(), rng),
        }
    }

    /// Play screen became visible; returns whether a card was offered while away
    #[wasm_bindgen]
    pub fn resume(&mut self, now_ms: f64) -> bool {
        self.game.resume(now_ms as i64).spawned
    }

    /// One-second countdown step; returns whether a new card was offered
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.game.tick(now_ms as i64).spawned
    }

    /// Collect the offered card
    #[wasm_bindgen]
    pub fn pick_up(&mut self, now_ms: f64) -> Result<JsValue, String> {
        let card = self.game.pick_up(now_ms as i64).map_err(|e| e.to_string())?;
        to_js(&card)
    }

    /// Create a card from `{imageUrl, name, description, rarity}`
    #[wasm_bindgen]
    pub fn add_card(&mut self, draft_js: JsValue, now_ms: f64) -> Result<JsValue, String> {
        let draft: CardDraft = serde_wasm_bindgen::from_value(draft_js)
            .map_err(|e| format!("Failed to parse card: {:?}", e))?;
        let card = self
            .game
            .add_card(draft, now_ms as i64)
            .map_err(|e| e.to_string())?;
        to_js(&card)
    }

    /// Create a reward card from `{imageUrl, name, description, requiredCards}`
    #[wasm_bindgen]
    pub fn add_reward_card(&mut self, draft_js: JsValue) -> Result<JsValue, String> {
        let draft: RewardCardDraft = serde_wasm_bindgen::from_value(draft_js)
            .map_err(|e| format!("Failed to parse reward card: {:?}", e))?;
        let reward = self.game.add_reward_card(draft).map_err(|e| e.to_string())?;
        to_js(&reward)
    }

    #[wasm_bindgen]
    pub fn redeem(&mut self, reward_id: &str) -> Result<JsValue, String> {
        let reward = self
            .game
            .redeem(&CardId::from(reward_id))
            .map_err(|e| e.to_string())?;
        to_js(&reward)
    }

    /// Get the current game view as JSON
    #[wasm_bindgen]
    pub fn get_view(&self) -> JsValue {
        log::debug("get_view", "Serializing game state to view");
        match to_js(&self.game.view()) {
            Ok(value) => value,
            Err(e) => {
                log::error(&e);
                JsValue::NULL
            }
        }
    }

    /// Save document for download
    #[wasm_bindgen]
    pub fn export_save(&self, now_ms: f64) -> Result<String, String> {
        self.game.export_save(now_ms as i64).map_err(|e| e.to_string())
    }

    #[wasm_bindgen]
    pub fn save_file_name(&self, now_ms: f64) -> String {
        cb_cards_core::save::save_file_name(now_ms as i64)
    }

    /// Replace everything with the contents of a save file
    #[wasm_bindgen]
    pub fn import_save(&mut self, json: &str, now_ms: f64) -> Result<JsValue, String> {
        let summary = self
            .game
            .import_save(json, now_ms as i64)
            .map_err(|e| e.to_string())?;
        to_js(&summary)
    }

    /// Wipe all saved data; the caller confirms with the user first
    #[wasm_bindgen]
    pub fn clear_all(&mut self, now_ms: f64) -> Result<(), String> {
        self.game.clear_all(now_ms as i64).map_err(|e| e.to_string())
    }

    /// Storage failures since the last call, for the UI to surface
    #[wasm_bindgen]
    pub fn take_warnings(&mut self) -> JsValue {
        let warnings = self.game.take_warnings();
        to_js(&warnings).unwrap_or(JsValue::NULL)
    }
}
