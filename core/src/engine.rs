//! Game engine
//!
//! Owns the state, the store, the RNG and the spawn timer. Every public
//! method is one user action or one timer event: it validates, mutates
//! memory, then persists. Failed writes never undo the in-memory change;
//! they are queued as warnings for the UI to show.

use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{GameError, GameResult, StorageError};
use crate::log;
use crate::rng::GameRng;
use crate::save::{export_save, parse_save};
use crate::spawn::{SpawnContext, SpawnTimer, TimerEvent, TimerOutcome};
use crate::state::GameState;
use crate::storage::{
    load_json, save_json, KeyValueStore, ALL_KEYS, CARDS_KEY, DECK_KEY, REWARD_CARDS_KEY,
};
use crate::types::*;
use crate::view::GameView;

/// Result of a successful import
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// When the save was made, as written in the file
    pub saved_at: Option<String>,
    pub cards: usize,
    pub reward_cards: usize,
    pub deck_entries: usize,
}

pub struct Game<S, R> {
    config: GameConfig,
    state: GameState,
    timer: SpawnTimer,
    store: S,
    rng: R,
    warnings: Vec<StorageError>,
}

impl<S: KeyValueStore, R: GameRng> Game<S, R> {
    /// Restore a session from the store.
    ///
    /// Corrupt or unreadable values are reported as warnings and start empty.
    /// The timer stays idle until the first `resume`.
    pub fn load(config: GameConfig, store: S, rng: R) -> Self {
        log::info("=== CB CARDS ENGINE INITIALIZED ===");
        let mut game = Self {
            config,
            state: GameState::new(),
            timer: SpawnTimer::new(),
            store,
            rng,
            warnings: Vec::new(),
        };

        if let Some(cards) = game.load_key(CARDS_KEY) {
            game.state.cards = cards;
        }
        if let Some(reward_cards) = game.load_key(REWARD_CARDS_KEY) {
            game.state.reward_cards = reward_cards;
        }
        if let Some(deck) = game.load_key(DECK_KEY) {
            game.state.deck = deck;
        }
        log::debug(
            "load",
            &format!(
                "{} cards, {} rewards, {} deck entries",
                game.state.cards.len(),
                game.state.reward_cards.len(),
                game.state.deck.len()
            ),
        );
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state, &self.timer)
    }

    /// Persistence failures since the last call
    pub fn take_warnings(&mut self) -> Vec<StorageError> {
        std::mem::take(&mut self.warnings)
    }

    /// Deliver a timer event
    pub fn handle(&mut self, event: TimerEvent, now_ms: i64) -> GameResult<TimerOutcome> {
        log::debug("timer", &format!("{event:?} at {now_ms}"));
        let ctx = SpawnContext {
            cards: &self.state.cards,
            store: &mut self.store,
            rng: &mut self.rng,
            config: &self.config,
            now_ms,
        };
        let mut outcome = self.timer.handle(event, ctx)?;
        self.warnings.append(&mut outcome.storage_errors);

        if let Some(card) = &outcome.picked {
            self.state.pick_up(card);
            self.persist_deck();
        }
        Ok(outcome)
    }

    /// Page load or tab visible again
    pub fn resume(&mut self, now_ms: i64) -> TimerOutcome {
        self.handle(TimerEvent::Resume, now_ms).unwrap_or_default()
    }

    /// One second of countdown
    pub fn tick(&mut self, now_ms: i64) -> TimerOutcome {
        self.handle(TimerEvent::Tick, now_ms).unwrap_or_default()
    }

    /// Take the offered card into the deck
    pub fn pick_up(&mut self, now_ms: i64) -> GameResult<Card> {
        log::action("pick_up", &format!("now={now_ms}"));
        let outcome = self.handle(TimerEvent::Pickup, now_ms);
        let card = outcome.and_then(|o| o.picked.ok_or(GameError::NoOfferPending));
        Self::log_result(&card, |card| format!("picked up {}", card.name));
        card
    }

    pub fn add_card(&mut self, draft: CardDraft, now_ms: i64) -> GameResult<Card> {
        log::action("add_card", &format!("name={}", draft.name));
        let card = self.state.add_card(draft, &mut self.rng);
        Self::log_result(&card, |card| format!("created card {} ({})", card.name, card.id));
        let card = card?;
        self.persist_cards();
        self.handle(TimerEvent::CatalogChanged, now_ms)?;
        Ok(card)
    }

    pub fn add_reward_card(&mut self, draft: RewardCardDraft) -> GameResult<RewardCard> {
        log::action("add_reward_card", &format!("name={}", draft.name));
        let reward = self.state.add_reward_card(draft, &mut self.rng);
        Self::log_result(&reward, |reward| {
            format!("created reward {} ({})", reward.name, reward.id)
        });
        let reward = reward?;
        self.persist_reward_cards();
        Ok(reward)
    }

    /// Consume a reward's cost and add the reward to the deck
    pub fn redeem(&mut self, reward_id: &CardId) -> GameResult<RewardCard> {
        log::action("redeem", &format!("reward={reward_id}"));
        let reward = self.state.redeem(reward_id);
        Self::log_result(&reward, |reward| format!("redeemed {}", reward.name));
        let reward = reward?;
        self.persist_deck();
        Ok(reward)
    }

    /// Pretty-printed save document for download
    pub fn export_save(&self, now_ms: i64) -> GameResult<String> {
        log::action("export_save", &format!("now={now_ms}"));
        export_save(&self.state, now_ms)
    }

    /// Replace everything with the contents of a save document.
    ///
    /// Validation happens before any mutation; a rejected file leaves the
    /// session untouched.
    pub fn import_save(&mut self, json: &str, now_ms: i64) -> GameResult<ImportSummary> {
        log::action("import_save", &format!("{} bytes", json.len()));
        let save = parse_save(json);
        Self::log_result(&save, |_| "save file accepted".to_string());
        let save = save?;

        let saved_at = save.timestamp.clone();
        self.state = save.into_state();
        self.persist_cards();
        self.persist_reward_cards();
        self.persist_deck();
        self.handle(TimerEvent::CatalogChanged, now_ms)?;

        Ok(ImportSummary {
            saved_at,
            cards: self.state.cards.len(),
            reward_cards: self.state.reward_cards.len(),
            deck_entries: self.state.deck.len(),
        })
    }

    /// Delete all stored data, then reset memory and stop the timer
    pub fn clear_all(&mut self, now_ms: i64) -> GameResult<()> {
        log::action("clear_all", "removing every stored key");
        for key in ALL_KEYS {
            if let Err(e) = self.store.remove(key) {
                log::error(&format!("could not clear `{key}`: {e}"));
                return Err(e.into());
            }
        }
        self.state.clear();
        // Idle without re-stamping the spawn time: the store stays empty
        self.timer = SpawnTimer::new();
        log::result(true, &format!("all game data cleared at {now_ms}"));
        Ok(())
    }

    fn load_key<T: serde::de::DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        match load_json(&self.store, key) {
            Ok(value) => value,
            Err(e) => {
                log::error(&format!("failed to load `{key}`: {e}"));
                self.warnings.push(e);
                None
            }
        }
    }

    fn persist_cards(&mut self) {
        let result = save_json(&mut self.store, CARDS_KEY, &self.state.cards);
        self.note_write(CARDS_KEY, result);
    }

    fn persist_reward_cards(&mut self) {
        let result = save_json(&mut self.store, REWARD_CARDS_KEY, &self.state.reward_cards);
        self.note_write(REWARD_CARDS_KEY, result);
    }

    fn persist_deck(&mut self) {
        let result = save_json(&mut self.store, DECK_KEY, &self.state.deck);
        self.note_write(DECK_KEY, result);
    }

    fn note_write(&mut self, key: &str, result: Result<(), StorageError>) {
        if let Err(e) = result {
            log::warn(&format!("`{key}` not saved, change kept for this session only: {e}"));
            self.warnings.push(e);
        }
    }

    fn log_result<T>(result: &GameResult<T>, describe: impl FnOnce(&T) -> String) {
        match result {
            Ok(value) => log::result(true, &describe(value)),
            Err(e) => log::result(false, &e.to_string()),
        }
    }
}
