mod catalog;
mod save;
mod view;

use crate::config::GameConfig;
use crate::ledger::Ledger;
use crate::rng::XorShiftRng;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// One minute keeps the arithmetic in tests readable
const INTERVAL: i64 = 60_000;
/// 2024-01-01T00:00:00Z
const NOW: i64 = 1_704_067_200_000;

fn test_config() -> GameConfig {
    GameConfig {
        spawn_interval_ms: INTERVAL,
        ..GameConfig::default()
    }
}

fn rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(42)
}

fn create_card(id: &str, name: &str, rarity: Rarity) -> Card {
    Card {
        id: CardId::from(id),
        image_url: format!("data:image/png;base64,{id}"),
        name: name.to_string(),
        description: format!("{name} card"),
        rarity,
    }
}

fn create_reward(id: &str, required: &[(&str, u32)]) -> RewardCard {
    RewardCard {
        id: CardId::from(id),
        image_url: "data:image/png;base64,cmV3YXJk".to_string(),
        name: format!("Reward {id}"),
        description: "Test reward".to_string(),
        required_cards: required
            .iter()
            .map(|(card_id, quantity)| RequiredCard::new(*card_id, *quantity))
            .collect(),
    }
}

fn create_ledger(entries: &[(&str, u32)]) -> Ledger {
    entries
        .iter()
        .map(|(id, qty)| (CardId::from(*id), *qty))
        .collect()
}

fn card_draft(name: &str, rarity: Rarity) -> CardDraft {
    CardDraft {
        image_url: "data:image/png;base64,AAAA".to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        rarity,
    }
}

fn reward_draft(name: &str, required: Vec<RequiredCard>) -> RewardCardDraft {
    RewardCardDraft {
        image_url: "data:image/png;base64,BBBB".to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        required_cards: required,
    }
}

fn sample_catalog() -> Vec<Card> {
    vec![
        create_card("c1", "Slime", Rarity::Common),
        create_card("c2", "Goblin", Rarity::Common),
        create_card("u1", "Wolf", Rarity::Uncommon),
        create_card("l1", "Dragon", Rarity::Legendary),
    ]
}
