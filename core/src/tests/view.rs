use super::*;
use crate::catalog::UNKNOWN_CARD_NAME;
use crate::spawn::{SpawnTimer, TimerPhase};
use crate::state::GameState;
use crate::view::*;

fn sample_state() -> GameState {
    GameState {
        cards: sample_catalog(),
        reward_cards: vec![
            create_reward("r1", &[("c1", 2), ("gone", 1)]),
            create_reward("r2", &[("u1", 1)]),
        ],
        deck: create_ledger(&[("c1", 3), ("r2", 1), ("stale", 4), ("u1", 1)]),
    }
}

#[test]
fn test_deck_items_resolve_both_catalogs_and_skip_stale_ids() {
    let state = sample_state();

    let items = deck_items(&state);

    let names: Vec<(&str, u32)> = items.iter().map(|item| (item.card.name(), item.quantity)).collect();
    assert_eq!(names, vec![("Slime", 3), ("Reward r2", 1), ("Wolf", 1)]);
    assert!(matches!(items[1].card, AnyCard::Reward(_)));
}

#[test]
fn test_reward_progress() {
    let state = sample_state();

    let rewards = reward_views(&state);

    let r1 = &rewards[0];
    assert!(!r1.can_redeem);
    assert_eq!(
        r1.requirements[0],
        RequirementView {
            card_id: CardId::from("c1"),
            name: "Slime".to_string(),
            have: 3,
            need: 2,
            satisfied: true,
        }
    );
    assert_eq!(r1.requirements[1].name, UNKNOWN_CARD_NAME);
    assert!(!r1.requirements[1].satisfied);

    let r2 = &rewards[1];
    assert!(r2.can_redeem);
    assert_eq!(r2.requirements[0].have, 1);
}

#[test]
fn test_idle_timer_view() {
    let view = GameView::from_state(&GameState::new(), &SpawnTimer::new());

    assert_eq!(view.timer.phase, TimerPhase::Idle);
    assert_eq!(view.timer.countdown, "00:00");
    assert!(view.timer.offer.is_none());
    assert!(view.deck.is_empty());
}

#[test]
fn test_view_serializes_camel_case() {
    let view = GameView::from_state(&sample_state(), &SpawnTimer::new());
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["timer"]["phase"], "idle");
    assert_eq!(json["timer"]["remainingSecs"], 0);
    assert_eq!(json["rewards"][1]["canRedeem"], true);
    assert_eq!(json["deck"][0]["card"]["rarity"], "Comum");
}
