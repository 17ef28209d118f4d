//! Weighted rarity selection and the card pool filter.

use serde::{Deserialize, Serialize};

use crate::rng::GameRng;
use crate::types::{Card, Rarity};

/// Probability of one tier in the spawn table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityChance {
    pub rarity: Rarity,
    pub chance: f64,
}

/// Reference spawn table. Order matters: selection walks it top to bottom.
pub const RARITY_CHANCES: [RarityChance; 5] = [
    RarityChance { rarity: Rarity::Common, chance: 0.50 },
    RarityChance { rarity: Rarity::Uncommon, chance: 0.25 },
    RarityChance { rarity: Rarity::Rare, chance: 0.15 },
    RarityChance { rarity: Rarity::Epic, chance: 0.08 },
    RarityChance { rarity: Rarity::Legendary, chance: 0.02 },
];

/// Pick the first tier whose cumulative chance exceeds `draw`.
///
/// A draw sitting exactly on a cumulative edge belongs to the next tier.
/// Returns `None` when the table sums to less than `draw`.
pub fn select_rarity(draw: f64, table: &[RarityChance]) -> Option<Rarity> {
    let mut cumulative = 0.0;
    for entry in table {
        cumulative += entry.chance;
        if draw < cumulative {
            return Some(entry.rarity);
        }
    }
    None
}

/// Cards eligible for a spawn of the given tier.
///
/// Falls back to the whole catalog when no tier was selected or when the
/// tier has no cards.
pub fn eligible_pool<'a>(cards: &'a [Card], rarity: Option<Rarity>) -> Vec<&'a Card> {
    let pool: Vec<&Card> = match rarity {
        Some(rarity) => cards.iter().filter(|card| card.rarity == rarity).collect(),
        None => Vec::new(),
    };
    if pool.is_empty() {
        cards.iter().collect()
    } else {
        pool
    }
}

/// Draw a card for the spawn slot, or `None` when the catalog is empty
pub fn pick_card<R: GameRng>(cards: &[Card], table: &[RarityChance], rng: &mut R) -> Option<Card> {
    let rarity = select_rarity(rng.next_unit(), table);
    let pool = eligible_pool(cards, rarity);
    if pool.is_empty() {
        return None;
    }
    let index = rng.gen_range(pool.len());
    Some(pool[index].clone())
}
