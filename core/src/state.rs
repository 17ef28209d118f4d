use serde::{Deserialize, Serialize};

use crate::catalog::{validate_card_draft, validate_reward_draft, UNKNOWN_CARD_NAME};
use crate::error::{GameError, GameResult};
use crate::ledger::Ledger;
use crate::rng::GameRng;
use crate::types::*;

/// Catalogs and deck: everything the player owns or created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Regular cards, in creation order
    pub cards: Vec<Card>,
    /// Reward cards, in creation order
    pub reward_cards: Vec<RewardCard>,
    /// Owned quantities
    pub deck: Ledger,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a card draft, give it a fresh id and append it
    pub fn add_card<R: GameRng>(&mut self, draft: CardDraft, rng: &mut R) -> GameResult<Card> {
        validate_card_draft(&draft)?;
        let id = self.fresh_id(rng, |state, id| state.find_card(id).is_some());
        let card = Card {
            id,
            image_url: draft.image_url,
            name: draft.name,
            description: draft.description,
            rarity: draft.rarity,
        };
        self.cards.push(card.clone());
        Ok(card)
    }

    /// Validate a reward draft, merge repeated requirements, give it an id and append it
    pub fn add_reward_card<R: GameRng>(&mut self, draft: RewardCardDraft, rng: &mut R) -> GameResult<RewardCard> {
        let required_cards = validate_reward_draft(&draft, &self.cards)?;
        let id = self.fresh_id(rng, |state, id| state.find_reward(id).is_some());
        let reward = RewardCard {
            id,
            image_url: draft.image_url,
            name: draft.name,
            description: draft.description,
            required_cards,
        };
        self.reward_cards.push(reward.clone());
        Ok(reward)
    }

    /// Take one copy of a card into the deck
    pub fn pick_up(&mut self, card: &Card) {
        self.deck.grant(&card.id);
    }

    /// Trade a reward's required cards for the reward itself
    pub fn redeem(&mut self, reward_id: &CardId) -> GameResult<RewardCard> {
        let reward = self
            .find_reward(reward_id)
            .cloned()
            .ok_or_else(|| GameError::RewardNotFound {
                reward_id: reward_id.clone(),
            })?;
        self.deck.try_redeem(&reward)?;
        Ok(reward)
    }

    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn find_reward(&self, id: &CardId) -> Option<&RewardCard> {
        self.reward_cards.iter().find(|reward| &reward.id == id)
    }

    /// Look an id up in both catalogs, regular cards first
    pub fn find_any(&self, id: &CardId) -> Option<AnyCard> {
        self.find_card(id)
            .cloned()
            .map(AnyCard::Card)
            .or_else(|| self.find_reward(id).cloned().map(AnyCard::Reward))
    }

    /// Display name for any id; misses render as "Unknown card"
    pub fn card_name(&self, id: &CardId) -> &str {
        self.find_card(id)
            .map(|card| card.name.as_str())
            .or_else(|| self.find_reward(id).map(|reward| reward.name.as_str()))
            .unwrap_or(UNKNOWN_CARD_NAME)
    }

    /// Forget every card, reward and deck entry
    pub fn clear(&mut self) {
        self.cards.clear();
        self.reward_cards.clear();
        self.deck.clear();
    }

    fn fresh_id<R, F>(&self, rng: &mut R, taken: F) -> CardId
    where
        R: GameRng,
        F: Fn(&Self, &CardId) -> bool,
    {
        loop {
            let id = CardId::generate(rng);
            if !taken(self, &id) {
                return id;
            }
        }
    }
}
