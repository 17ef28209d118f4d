//! Card spawn timer
//!
//! One slot holds at most one offered card. The time of the last spawn is
//! persisted as an absolute timestamp, so the countdown survives reloads,
//! background tabs and sleep: on `Resume` the elapsed wall-clock time is
//! recomputed and overdue spawns are caught up in a single offer.
//!
//! The timer only runs once the play screen has delivered a `Resume`.
//! Catalog edits before that, or while the countdown runs, never spawn.
//!
//! ```text
//!            Resume / first card added
//!   Idle ────────────────────────────────────────────► Counting
//!    ▲                                                  │   ▲
//!    │ catalog empty                     Tick at 0 /    │   │ Pickup
//!    │                                   overdue Resume ▼   │
//!    └───────────────────────────────────────────────── Offered
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ceil_secs, GameConfig};
use crate::error::{GameError, GameResult, StorageError};
use crate::log;
use crate::rarity::pick_card;
use crate::rng::GameRng;
use crate::storage::{load_last_spawn, save_last_spawn, KeyValueStore};
use crate::types::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    /// No cards exist; nothing can spawn
    Idle,
    /// Waiting for the next spawn
    Counting,
    /// A card is on offer and can be picked up
    Offered,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Counting => "counting",
            TimerPhase::Offered => "offered",
        }
    }
}

/// Inputs delivered to the timer by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Page load or tab became visible again
    Resume,
    /// One second elapsed
    Tick,
    /// The player took the offered card
    Pickup,
    /// Cards were added, imported or wiped
    CatalogChanged,
}

/// Everything an event needs besides the timer itself
pub struct SpawnContext<'a, S: ?Sized, R> {
    pub cards: &'a [Card],
    pub store: &'a mut S,
    pub rng: &'a mut R,
    pub config: &'a GameConfig,
    pub now_ms: i64,
}

/// What an event did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerOutcome {
    /// Card taken by a pickup
    pub picked: Option<Card>,
    /// Whether a new offer was generated
    pub spawned: bool,
    /// Writes that failed; the in-memory timer is still correct
    pub storage_errors: Vec<StorageError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    phase: TimerPhase,
    offer: Option<Card>,
    remaining_secs: u64,
    /// Set by the first `Resume`
    started: bool,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            offer: None,
            remaining_secs: 0,
            started: false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn offer(&self) -> Option<&Card> {
        self.offer.as_ref()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// Remaining time as `MM:SS`
    pub fn countdown(&self) -> String {
        format_countdown(self.remaining_secs)
    }

    pub fn handle<S, R>(&mut self, event: TimerEvent, ctx: SpawnContext<'_, S, R>) -> GameResult<TimerOutcome>
    where
        S: KeyValueStore + ?Sized,
        R: GameRng,
    {
        match event {
            TimerEvent::Resume => Ok(self.resume(ctx)),
            TimerEvent::Tick => Ok(self.tick(ctx)),
            TimerEvent::Pickup => self.pickup(ctx),
            TimerEvent::CatalogChanged => Ok(self.catalog_changed(ctx)),
        }
    }

    /// Rebuild the countdown from the persisted last-spawn time
    pub fn resume<S, R>(&mut self, ctx: SpawnContext<'_, S, R>) -> TimerOutcome
    where
        S: KeyValueStore + ?Sized,
        R: GameRng,
    {
        let mut outcome = TimerOutcome::default();
        self.started = true;
        if ctx.cards.is_empty() {
            self.enter_idle(ctx.store, ctx.now_ms, &mut outcome);
            self.log(ctx.cards.len());
            return outcome;
        }

        let interval = ctx.config.spawn_interval_ms;
        let now = ctx.now_ms;
        let stored = match load_last_spawn(&*ctx.store) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn(&format!("could not read last spawn time: {e}"));
                outcome.storage_errors.push(e);
                None
            }
        };

        // An age that does not fit in i64 is as stale as it gets
        let stale_after = ctx.config.stale_after_ms();
        let last = match stored {
            Some(last) if now.checked_sub(last).is_some_and(|age| age <= stale_after) => last,
            _ => {
                // First run or a long absence: act as if a card spawned one
                // interval ago so exactly one offer is due now.
                let baseline = now.saturating_sub(interval);
                persist(ctx.store, baseline, &mut outcome);
                baseline
            }
        };

        // A timestamp from the future (clock moved back) counts as "just spawned"
        let elapsed = now.saturating_sub(last).max(0);
        if elapsed >= interval {
            let intervals = elapsed / interval;
            let scheduled = last.saturating_add(intervals.saturating_mul(interval));
            log::debug(
                "spawn",
                &format!("{intervals} interval(s) overdue, scheduled spawn at {scheduled}"),
            );
            self.spawn(ctx.cards, ctx.rng, ctx.config, &mut outcome);
            persist(ctx.store, scheduled, &mut outcome);
            self.remaining_secs = ctx.config.interval_secs();
        } else {
            // Nothing is due yet, so nothing is on offer
            self.offer = None;
            self.remaining_secs = ceil_secs(interval - elapsed);
            self.phase = TimerPhase::Counting;
        }
        self.log(ctx.cards.len());
        outcome
    }

    /// Advance the countdown by one second
    pub fn tick<S, R>(&mut self, ctx: SpawnContext<'_, S, R>) -> TimerOutcome
    where
        S: KeyValueStore + ?Sized,
        R: GameRng,
    {
        let mut outcome = TimerOutcome::default();
        if self.phase == TimerPhase::Idle {
            return outcome;
        }
        if ctx.cards.is_empty() {
            self.enter_idle(ctx.store, ctx.now_ms, &mut outcome);
            return outcome;
        }

        if self.remaining_secs <= 1 {
            // Replaces an uncollected offer, if any
            self.spawn(ctx.cards, ctx.rng, ctx.config, &mut outcome);
            persist(ctx.store, ctx.now_ms, &mut outcome);
            self.remaining_secs = ctx.config.interval_secs();
            self.log(ctx.cards.len());
        } else {
            self.remaining_secs -= 1;
        }
        outcome
    }

    /// Hand the offered card to the caller and restart the cycle
    pub fn pickup<S, R>(&mut self, ctx: SpawnContext<'_, S, R>) -> GameResult<TimerOutcome>
    where
        S: KeyValueStore + ?Sized,
        R: GameRng,
    {
        if self.phase != TimerPhase::Offered {
            return Err(GameError::NoOfferPending);
        }
        let card = self.offer.take().ok_or(GameError::NoOfferPending)?;

        let mut outcome = TimerOutcome::default();
        persist(ctx.store, ctx.now_ms, &mut outcome);
        self.remaining_secs = ctx.config.interval_secs();
        self.phase = TimerPhase::Counting;
        outcome.picked = Some(card);
        self.log(ctx.cards.len());
        Ok(outcome)
    }

    /// React to the catalog being replaced, extended or wiped.
    ///
    /// Does nothing before the first `Resume`. An empty catalog stops the
    /// timer and the first card restarts it. Otherwise the countdown keeps
    /// running and only an offer whose card was removed is withdrawn.
    pub fn catalog_changed<S, R>(&mut self, ctx: SpawnContext<'_, S, R>) -> TimerOutcome
    where
        S: KeyValueStore + ?Sized,
        R: GameRng,
    {
        let mut outcome = TimerOutcome::default();
        if !self.started {
            return outcome;
        }
        if ctx.cards.is_empty() {
            if self.phase != TimerPhase::Idle {
                self.enter_idle(ctx.store, ctx.now_ms, &mut outcome);
                self.log(0);
            }
            return outcome;
        }
        if self.phase == TimerPhase::Idle {
            return self.resume(ctx);
        }

        let still_listed = self
            .offer
            .as_ref()
            .is_some_and(|offer| ctx.cards.iter().any(|card| card.id == offer.id));
        if self.offer.is_some() && !still_listed {
            log::debug("spawn", "offered card left the catalog, offer withdrawn");
            self.offer = None;
            self.phase = TimerPhase::Counting;
        }
        outcome
    }

    fn enter_idle<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, now_ms: i64, outcome: &mut TimerOutcome) {
        self.phase = TimerPhase::Idle;
        self.offer = None;
        self.remaining_secs = 0;
        persist(store, now_ms, outcome);
    }

    fn spawn<R: GameRng>(&mut self, cards: &[Card], rng: &mut R, config: &GameConfig, outcome: &mut TimerOutcome) {
        self.offer = pick_card(cards, &config.rarity_chances, rng);
        match &self.offer {
            Some(card) => {
                log::info(&format!("card spawned: {} ({})", card.name, card.rarity.label()));
                self.phase = TimerPhase::Offered;
                outcome.spawned = true;
            }
            None => self.phase = TimerPhase::Counting,
        }
    }

    fn log(&self, catalog_size: usize) {
        log::timer_summary(
            self.phase.as_str(),
            self.remaining_secs,
            self.offer.as_ref().map(|card| card.name.as_str()),
            catalog_size,
        );
    }
}

impl Default for SpawnTimer {
    fn default() -> Self {
        Self::new()
    }
}

fn persist<S: KeyValueStore + ?Sized>(store: &mut S, timestamp: i64, outcome: &mut TimerOutcome) {
    if let Err(e) = save_last_spawn(store, timestamp) {
        log::warn(&format!("spawn time not saved, timer may not survive a reload: {e}"));
        outcome.storage_errors.push(e);
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
