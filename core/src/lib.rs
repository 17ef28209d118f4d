//! Rules of CB Cards: a browser-local collectible card game.
//!
//! Cards spawn on a timer, the player picks them up into a deck and trades
//! deck cards for reward cards. State lives in a [`storage::KeyValueStore`]
//! and can be exported to and imported from a JSON save file.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod image;
pub mod ledger;
pub mod log;
pub mod rarity;
pub mod rng;
pub mod save;
pub mod spawn;
pub mod state;
pub mod storage;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use config::GameConfig;
pub use engine::{Game, ImportSummary};
pub use error::{GameError, GameResult, StorageError};
pub use ledger::Ledger;
pub use spawn::{SpawnTimer, TimerEvent, TimerOutcome, TimerPhase};
pub use state::GameState;
pub use types::*;
pub use view::GameView;
