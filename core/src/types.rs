use core::fmt;

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

/// Opaque identifier shared by cards and reward cards
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Build a random (version 4) UUID from the game RNG
    pub fn generate<R: GameRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        CardId(uuid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId(value.to_string())
    }
}

/// Rarity tiers, ordered from most to least common.
///
/// The serialized labels match what existing saves and browser storage hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "Comum")]
    Common,
    #[serde(rename = "Incomum")]
    Uncommon,
    #[serde(rename = "Raro")]
    Rare,
    #[serde(rename = "Épico")]
    Epic,
    #[serde(rename = "Lendário")]
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Label used in storage and save files
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Comum",
            Rarity::Uncommon => "Incomum",
            Rarity::Rare => "Raro",
            Rarity::Epic => "Épico",
            Rarity::Legendary => "Lendário",
        }
    }
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Common
    }
}

/// A collectible card that can be spawned and picked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
}

/// One line of a reward's cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredCard {
    pub card_id: CardId,
    pub quantity: u32,
}

impl RequiredCard {
    pub fn new(card_id: impl Into<CardId>, quantity: u32) -> Self {
        Self {
            card_id: card_id.into(),
            quantity,
        }
    }
}

/// A card obtained by consuming other cards from the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardCard {
    pub id: CardId,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub required_cards: Vec<RequiredCard>,
}

/// Form input for a new card (no id yet)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardDraft {
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
}

/// Form input for a new reward card (no id yet)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardCardDraft {
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub required_cards: Vec<RequiredCard>,
}

/// Either kind of card, as held in the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyCard {
    Reward(RewardCard),
    Card(Card),
}

impl AnyCard {
    pub fn id(&self) -> &CardId {
        match self {
            AnyCard::Card(card) => &card.id,
            AnyCard::Reward(reward) => &reward.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AnyCard::Card(card) => &card.name,
            AnyCard::Reward(reward) => &reward.name,
        }
    }
}
