//! Error types for game operations
//!
//! Every variant is a reported condition: the caller shows the message and
//! the game state is either unchanged or already rolled back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CardId;

/// Failures of the local key-value store
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StorageError {
    /// The browser refused the write because its storage quota is full
    #[error("browser storage is full; export your game and clear some data")]
    QuotaExceeded,
    /// No storage backend is reachable (private mode, disabled storage)
    #[error("local storage is unavailable: {reason}")]
    Unavailable { reason: String },
    /// Any other error raised by the backend
    #[error("local storage error: {reason}")]
    Backend { reason: String },
    /// A stored value could not be decoded
    #[error("stored value under `{key}` is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    /// A value could not be encoded for storage
    #[error("could not encode value for `{key}`: {reason}")]
    Encode { key: String, reason: String },
}

/// Game errors that can occur during play
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// A required form field is blank
    #[error("{field} is required")]
    MissingField { field: String },
    /// A reward card must cost at least one card
    #[error("a reward card needs at least one required card")]
    NoRequiredCards,
    /// Requirement quantities start at one
    #[error("quantity for card {card_id} must be at least 1")]
    InvalidQuantity { card_id: CardId },
    /// A requirement points at a card that does not exist
    #[error("card {card_id} does not exist")]
    UnknownCard { card_id: CardId },
    /// Redemption was asked for a reward that does not exist
    #[error("reward {reward_id} not found")]
    RewardNotFound { reward_id: CardId },
    /// The deck does not cover a reward's cost
    #[error("not enough cards to redeem: card {card_id} have {have}, need {need}")]
    InsufficientCards { card_id: CardId, have: u32, need: u32 },
    /// Pickup was requested while no card is on offer
    #[error("no card is on offer")]
    NoOfferPending,
    /// A save file failed validation
    #[error("invalid save file: {reason}")]
    InvalidSaveFile { reason: String },
    /// Uploaded file is not an image
    #[error("`{mime}` is not an image type")]
    InvalidImage { mime: String },
    /// Configuration values out of range
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
    /// Storage failure that aborted the operation
    #[error("{error}")]
    Storage {
        #[from]
        error: StorageError,
    },
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
