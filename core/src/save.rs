//! Save files: export, import and download naming
//!
//! A save is `{cards, rewardCards, deck, timestamp}` where `deck` is a list
//! of `[cardId, quantity]` pairs and `timestamp` is an ISO-8601 UTC string.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GameError, GameResult};
use crate::ledger::Ledger;
use crate::state::GameState;
use crate::types::{Card, CardId, RewardCard};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    pub cards: Vec<Card>,
    pub reward_cards: Vec<RewardCard>,
    pub deck: Ledger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SaveFile {
    pub fn from_state(state: &GameState, now_ms: i64) -> Self {
        Self {
            cards: state.cards.clone(),
            reward_cards: state.reward_cards.clone(),
            deck: state.deck.clone(),
            timestamp: Some(iso_timestamp(now_ms)),
        }
    }

    pub fn into_state(self) -> GameState {
        GameState {
            cards: self.cards,
            reward_cards: self.reward_cards,
            deck: self.deck,
        }
    }
}

/// Serialize the current state as a pretty-printed save document
pub fn export_save(state: &GameState, now_ms: i64) -> GameResult<String> {
    let save = SaveFile::from_state(state, now_ms);
    serde_json::to_string_pretty(&save).map_err(|e| GameError::InvalidSaveFile {
        reason: e.to_string(),
    })
}

/// Parse and validate a save document without touching any live state
pub fn parse_save(json: &str) -> GameResult<SaveFile> {
    let value: Value = serde_json::from_str(json).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| invalid("top level must be an object".to_string()))?;
    for field in ["cards", "rewardCards", "deck"] {
        if !object.get(field).is_some_and(Value::is_array) {
            return Err(invalid(format!("`{field}` must be an array")));
        }
    }

    let save: SaveFile = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
    check_unique(save.cards.iter().map(|card| &card.id), "card")?;
    check_unique(save.reward_cards.iter().map(|reward| &reward.id), "reward card")?;
    for reward in &save.reward_cards {
        if let Some(req) = reward.required_cards.iter().find(|req| req.quantity == 0) {
            return Err(invalid(format!(
                "reward {} requires zero copies of {}",
                reward.id, req.card_id
            )));
        }
    }
    Ok(save)
}

/// Download name for a save made at `now_ms`, e.g. `cb_cards_save_02-01-2025.json`
pub fn save_file_name(now_ms: i64) -> String {
    let date = DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or(DateTime::UNIX_EPOCH);
    format!("cb_cards_save_{}.json", date.format("%d-%m-%Y"))
}

/// ISO-8601 UTC with milliseconds, e.g. `2025-01-02T03:04:05.678Z`
pub fn iso_timestamp(now_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(now_ms)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn check_unique<'a>(ids: impl Iterator<Item = &'a CardId>, kind: &str) -> GameResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate {kind} id {id}")));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidSaveFile { reason }
}
