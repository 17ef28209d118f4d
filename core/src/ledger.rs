//! The player's deck: owned quantity per card id.
//!
//! Quantities are always positive; an entry that would drop to zero is
//! removed instead. Serialized as a list of `[cardId, quantity]` pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::types::{CardId, RequiredCard, RewardCard};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(CardId, i64)>", into = "Vec<(CardId, u32)>")]
pub struct Ledger {
    entries: BTreeMap<CardId, u32>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of a card; a count already at `u32::MAX` stays there
    pub fn grant(&mut self, card_id: &CardId) {
        let quantity = self.entries.entry(card_id.clone()).or_insert(0);
        *quantity = quantity.saturating_add(1);
    }

    /// Owned quantity, zero when absent
    pub fn quantity(&self, card_id: &CardId) -> u32 {
        self.entries.get(card_id).copied().unwrap_or(0)
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.entries.contains_key(card_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, u32)> + '_ {
        self.entries.iter().map(|(id, qty)| (id, *qty))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether the deck covers every requirement of `reward`
    pub fn can_redeem(&self, reward: &RewardCard) -> bool {
        self.first_shortfall(&reward.required_cards).is_none()
    }

    /// Consume the reward's cost and add the reward itself, or do nothing.
    ///
    /// Requirements are checked against the quantities held before the
    /// redemption, so a reward that costs copies of itself sees its own
    /// pre-redemption count.
    pub fn try_redeem(&mut self, reward: &RewardCard) -> GameResult<()> {
        if let Some((card_id, have, need)) = self.first_shortfall(&reward.required_cards) {
            return Err(GameError::InsufficientCards {
                card_id,
                have,
                need,
            });
        }

        for (card_id, need) in total_requirements(&reward.required_cards) {
            let remaining = self.quantity(&card_id).saturating_sub(need);
            if remaining == 0 {
                self.entries.remove(&card_id);
            } else {
                self.entries.insert(card_id, remaining);
            }
        }
        self.grant(&reward.id);
        Ok(())
    }

    fn first_shortfall(&self, required: &[RequiredCard]) -> Option<(CardId, u32, u32)> {
        total_requirements(required)
            .into_iter()
            .map(|(card_id, need)| {
                let have = self.quantity(&card_id);
                (card_id, have, need)
            })
            .find(|(_, have, need)| have < need)
    }
}

/// Sum the quantities of repeated ids, keeping first-seen order
pub(crate) fn total_requirements(required: &[RequiredCard]) -> Vec<(CardId, u32)> {
    let mut totals: Vec<(CardId, u32)> = Vec::with_capacity(required.len());
    for req in required {
        match totals.iter_mut().find(|(id, _)| *id == req.card_id) {
            Some((_, total)) => *total = total.saturating_add(req.quantity),
            None => totals.push((req.card_id.clone(), req.quantity)),
        }
    }
    totals
}

impl From<Vec<(CardId, i64)>> for Ledger {
    /// Later pairs override earlier ones; non-positive quantities are dropped
    fn from(pairs: Vec<(CardId, i64)>) -> Self {
        let mut entries = BTreeMap::new();
        for (card_id, quantity) in pairs {
            if quantity > 0 {
                entries.insert(card_id, u32::try_from(quantity).unwrap_or(u32::MAX));
            } else {
                entries.remove(&card_id);
            }
        }
        Self { entries }
    }
}

impl From<Ledger> for Vec<(CardId, u32)> {
    fn from(ledger: Ledger) -> Self {
        ledger.entries.into_iter().collect()
    }
}

impl FromIterator<(CardId, u32)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (CardId, u32)>>(iter: I) -> Self {
        let pairs: Vec<(CardId, i64)> = iter
            .into_iter()
            .map(|(id, qty)| (id, i64::from(qty)))
            .collect();
        Ledger::from(pairs)
    }
}
