//! Draft validation for the card and reward card forms.

use crate::error::{GameError, GameResult};
use crate::ledger::total_requirements;
use crate::types::{Card, CardDraft, RequiredCard, RewardCardDraft};

/// Name shown for ids that resolve to nothing
pub const UNKNOWN_CARD_NAME: &str = "Unknown card";

fn require(field: &str, value: &str) -> GameResult<()> {
    if value.trim().is_empty() {
        return Err(GameError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

pub fn validate_card_draft(draft: &CardDraft) -> GameResult<()> {
    require("name", &draft.name)?;
    require("description", &draft.description)?;
    require("image", &draft.image_url)?;
    Ok(())
}

/// Check a reward draft and return its requirements with duplicate ids merged
pub fn validate_reward_draft(draft: &RewardCardDraft, cards: &[Card]) -> GameResult<Vec<RequiredCard>> {
    require("name", &draft.name)?;
    require("description", &draft.description)?;
    if draft.required_cards.is_empty() {
        return Err(GameError::NoRequiredCards);
    }
    require("image", &draft.image_url)?;

    for req in &draft.required_cards {
        if req.quantity == 0 {
            return Err(GameError::InvalidQuantity {
                card_id: req.card_id.clone(),
            });
        }
        if !cards.iter().any(|card| card.id == req.card_id) {
            return Err(GameError::UnknownCard {
                card_id: req.card_id.clone(),
            });
        }
    }

    Ok(total_requirements(&draft.required_cards)
        .into_iter()
        .map(|(card_id, quantity)| RequiredCard { card_id, quantity })
        .collect())
}
