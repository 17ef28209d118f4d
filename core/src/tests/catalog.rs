use super::*;
use crate::catalog::UNKNOWN_CARD_NAME;
use crate::error::GameError;
use crate::state::GameState;

#[test]
fn test_add_card_assigns_uuid_and_appends() {
    let mut state = GameState::new();
    let mut rng = rng();

    let first = state.add_card(card_draft("Slime", Rarity::Common), &mut rng).unwrap();
    let second = state.add_card(card_draft("Slime", Rarity::Common), &mut rng).unwrap();

    assert_ne!(first.id, second.id, "same name still gets a fresh id");
    assert_eq!(state.cards, vec![first.clone(), second]);
    assert_eq!(first.id.as_str().len(), 36);
    assert_eq!(first.id.as_str().as_bytes()[14], b'4', "version 4 uuid");
}

#[test]
fn test_blank_card_fields_are_rejected() {
    let mut state = GameState::new();
    let mut rng = rng();

    let mut draft = card_draft("Slime", Rarity::Common);
    draft.name = "   ".to_string();
    assert_eq!(
        state.add_card(draft, &mut rng),
        Err(GameError::MissingField {
            field: "name".to_string()
        })
    );

    let mut draft = card_draft("Slime", Rarity::Common);
    draft.description.clear();
    assert!(matches!(
        state.add_card(draft, &mut rng),
        Err(GameError::MissingField { field }) if field == "description"
    ));

    let mut draft = card_draft("Slime", Rarity::Common);
    draft.image_url.clear();
    assert!(matches!(
        state.add_card(draft, &mut rng),
        Err(GameError::MissingField { field }) if field == "image"
    ));

    assert!(state.cards.is_empty());
}

#[test]
fn test_reward_requirements_are_merged() {
    let mut state = GameState::new();
    state.cards = sample_catalog();
    let mut rng = rng();

    let reward = state
        .add_reward_card(
            reward_draft(
                "Crown",
                vec![
                    RequiredCard::new("c1", 2),
                    RequiredCard::new("u1", 1),
                    RequiredCard::new("c1", 3),
                ],
            ),
            &mut rng,
        )
        .unwrap();

    assert_eq!(
        reward.required_cards,
        vec![RequiredCard::new("c1", 5), RequiredCard::new("u1", 1)]
    );
    assert_eq!(state.reward_cards, vec![reward]);
}

#[test]
fn test_reward_validation_failures_do_not_mutate() {
    let mut state = GameState::new();
    state.cards = sample_catalog();
    let mut rng = rng();

    assert_eq!(
        state.add_reward_card(reward_draft("Crown", vec![]), &mut rng),
        Err(GameError::NoRequiredCards)
    );
    assert_eq!(
        state.add_reward_card(reward_draft("Crown", vec![RequiredCard::new("c1", 0)]), &mut rng),
        Err(GameError::InvalidQuantity {
            card_id: CardId::from("c1")
        })
    );
    assert_eq!(
        state.add_reward_card(reward_draft("Crown", vec![RequiredCard::new("nope", 1)]), &mut rng),
        Err(GameError::UnknownCard {
            card_id: CardId::from("nope")
        })
    );
    assert!(state.reward_cards.is_empty());
}

#[test]
fn test_redeem_unknown_reward_is_reported() {
    let mut state = GameState::new();
    assert_eq!(
        state.redeem(&CardId::from("ghost")),
        Err(GameError::RewardNotFound {
            reward_id: CardId::from("ghost")
        })
    );
}

#[test]
fn test_redeem_through_state() {
    let mut state = GameState::new();
    state.cards = sample_catalog();
    state.reward_cards = vec![create_reward("r1", &[("c1", 2)])];
    state.deck = create_ledger(&[("c1", 2), ("l1", 1)]);

    let reward = state.redeem(&CardId::from("r1")).unwrap();

    assert_eq!(reward.id, CardId::from("r1"));
    assert_eq!(state.deck, create_ledger(&[("l1", 1), ("r1", 1)]));
}

#[test]
fn test_card_name_falls_back_to_unknown() {
    let mut state = GameState::new();
    state.cards = sample_catalog();
    state.reward_cards = vec![create_reward("r1", &[("c1", 1)])];

    assert_eq!(state.card_name(&CardId::from("c2")), "Goblin");
    assert_eq!(state.card_name(&CardId::from("r1")), "Reward r1");
    assert_eq!(state.card_name(&CardId::from("zzz")), UNKNOWN_CARD_NAME);
}

#[test]
fn test_rarity_labels_round_trip_through_json() {
    let card = create_card("e1", "Phoenix", Rarity::Epic);
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["rarity"], "Épico");
    assert_eq!(json["imageUrl"], "data:image/png;base64,e1");

    let parsed: Rarity = serde_json::from_str("\"Lendário\"").unwrap();
    assert_eq!(parsed, Rarity::Legendary);
}
