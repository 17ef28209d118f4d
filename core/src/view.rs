//! View types for UI serialization
//!
//! This module provides view structs for sending game state to the JS UI.

use serde::{Deserialize, Serialize};

use crate::spawn::{SpawnTimer, TimerPhase};
use crate::state::GameState;
use crate::types::*;

/// One deck entry resolved against the catalogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckItemView {
    pub card: AnyCard,
    pub quantity: u32,
}

/// Progress on one line of a reward's cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementView {
    pub card_id: CardId,
    /// Card name, or "Unknown card" if the id resolves to nothing
    pub name: String,
    pub have: u32,
    pub need: u32,
    pub satisfied: bool,
}

/// A reward card with its redemption progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardView {
    pub reward: RewardCard,
    pub requirements: Vec<RequirementView>,
    pub can_redeem: bool,
}

/// Spawn timer as shown on the play screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    pub phase: TimerPhase,
    pub remaining_secs: u64,
    /// `MM:SS`
    pub countdown: String,
    pub offer: Option<Card>,
}

impl From<&SpawnTimer> for TimerView {
    fn from(timer: &SpawnTimer) -> Self {
        Self {
            phase: timer.phase(),
            remaining_secs: timer.remaining_secs(),
            countdown: timer.countdown(),
            offer: timer.offer().cloned(),
        }
    }
}

/// The complete game view sent to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub cards: Vec<Card>,
    pub rewards: Vec<RewardView>,
    pub deck: Vec<DeckItemView>,
    pub timer: TimerView,
}

impl GameView {
    pub fn from_state(state: &GameState, timer: &SpawnTimer) -> Self {
        Self {
            cards: state.cards.clone(),
            rewards: reward_views(state),
            deck: deck_items(state),
            timer: TimerView::from(timer),
        }
    }
}

/// Deck entries that resolve to a known card; stale ids are skipped
pub fn deck_items(state: &GameState) -> Vec<DeckItemView> {
    state
        .deck
        .iter()
        .filter_map(|(card_id, quantity)| {
            state
                .find_any(card_id)
                .map(|card| DeckItemView { card, quantity })
        })
        .collect()
}

pub fn reward_views(state: &GameState) -> Vec<RewardView> {
    state
        .reward_cards
        .iter()
        .map(|reward| {
            let requirements: Vec<RequirementView> = reward
                .required_cards
                .iter()
                .map(|req| {
                    let have = state.deck.quantity(&req.card_id);
                    RequirementView {
                        card_id: req.card_id.clone(),
                        name: state.card_name(&req.card_id).to_string(),
                        have,
                        need: req.quantity,
                        satisfied: have >= req.quantity,
                    }
                })
                .collect();
            RewardView {
                can_redeem: state.deck.can_redeem(reward),
                reward: reward.clone(),
                requirements,
            }
        })
        .collect()
}
