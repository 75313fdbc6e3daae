//! Tests for the round engine state machine.

use std::collections::HashMap;

use imposter_game::{
    Advance, CategoryKey, CategorySelection, ConfirmAction, PendingAction, Phase, Player,
    PlayerId, Roster, RosterError, RoundEngine, ScriptedRandom, SecretCard, Snapshot, StartError,
    WordBank,
};

fn words() -> WordBank {
    let mut lists = HashMap::new();
    lists.insert(
        CategoryKey::Places,
        vec!["Airport".into(), "Beach".into(), "Library".into(), "Mosque".into()],
    );
    lists.insert(
        CategoryKey::Food,
        vec!["Pizza".into(), "Kabsa".into(), "Dates".into()],
    );
    lists.insert(
        CategoryKey::Jobs,
        vec!["Pilot".into(), "Chef".into(), "Barber".into(), "Farmer".into(), "Dentist".into()],
    );
    WordBank::new(lists)
}

fn only(keys: &[CategoryKey]) -> CategorySelection {
    let mut selection = CategorySelection::all_enabled();
    for key in CategoryKey::all() {
        selection.set(key, keys.contains(&key));
    }
    selection
}

fn engine_with(
    names: &[&str],
    keys: &[CategoryKey],
    picks: Vec<usize>,
) -> RoundEngine<ScriptedRandom> {
    let mut engine = RoundEngine::new(
        Snapshot::new(only(keys), Roster::new()),
        words(),
        ScriptedRandom::new(picks),
    );
    for name in names {
        engine.add_player(name).expect("Valid name");
    }
    engine.take_dirty();
    engine
}

fn info_body(engine: &RoundEngine<ScriptedRandom>) -> String {
    match engine.pending() {
        PendingAction::Info(dialog) => dialog.body().clone(),
        other => panic!("Expected info dialog, got {:?}", other),
    }
}

#[test]
fn test_two_players_cannot_start() {
    let mut engine = engine_with(&["Ali", "Sara"], &[CategoryKey::Places], vec![]);
    let result = engine.start_round();
    assert_eq!(result, Err(StartError::NotEnoughPlayers { count: 2 }));
    assert_eq!(engine.phase(), Phase::Setup);
    assert!(engine.round().is_none());
    assert_eq!(info_body(&engine), "You need at least 3 players.");
}

#[test]
fn test_no_category_cannot_start() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[], vec![]);
    assert_eq!(engine.start_round(), Err(StartError::NoCategorySelected));
    assert_eq!(engine.phase(), Phase::Setup);
    assert_eq!(info_body(&engine), "Pick at least one category.");
}

#[test]
fn test_small_word_list_names_category() {
    let mut engine = engine_with(
        &["Ali", "Sara", "Omar"],
        &[CategoryKey::Places, CategoryKey::Food],
        vec![],
    );
    let err = engine.start_round().expect_err("Food only has 3 words");
    assert!(matches!(
        err,
        StartError::WordListTooSmall {
            category: CategoryKey::Food,
            count: 3
        }
    ));
    assert!(info_body(&engine).contains("Food"));
    assert_eq!(engine.phase(), Phase::Setup);

    engine.dismiss();
    assert!(engine.pending().is_none());
}

#[test]
fn test_start_round_deals_from_script() {
    // category 1 of [Places, Jobs], word 4 of Jobs, imposter 1
    let mut engine = engine_with(
        &["Ali", "Sara", "Omar"],
        &[CategoryKey::Places, CategoryKey::Jobs],
        vec![1, 4, 1],
    );
    engine.start_round().expect("Valid round");

    assert_eq!(engine.phase(), Phase::Reveal);
    let round = engine.round().expect("Round dealt");
    assert_eq!(*round.category(), CategoryKey::Jobs);
    assert_eq!(round.secret_word(), "Dentist");
    assert_eq!(*round.imposter_index(), 1);
    assert_eq!(round.revealed(), &vec![false, false, false]);
    assert_eq!(*round.current_reveal_index(), Some(0));
    assert_eq!(engine.current_player().map(|p| p.name().as_str()), Some("Ali"));
    assert!(engine.current_card().is_none(), "Card hidden until shown");
}

#[test]
fn test_reveal_completes_after_each_player() {
    let names = ["Ali", "Sara", "Omar", "Huda", "Faisal"];
    let mut engine = engine_with(&names, &[CategoryKey::Places], vec![0, 2, 3]);
    engine.start_round().expect("Valid round");

    for i in 0..names.len() {
        assert_eq!(engine.phase(), Phase::Reveal);
        assert_eq!(engine.current_player().map(|p| p.name().as_str()), Some(names[i]));
        assert!(engine.show_secret());
        let advance = engine.next_player().expect("Card was shown");
        if i + 1 < names.len() {
            assert_eq!(advance, Advance::Next(i + 1));
        } else {
            assert_eq!(advance, Advance::Complete);
        }
    }

    assert_eq!(engine.phase(), Phase::Discussion);
    let round = engine.round().expect("Round kept for discussion");
    assert!(round.revealed().iter().all(|r| *r));
    assert_eq!(*round.current_reveal_index(), None);
}

#[test]
fn test_next_requires_shown_card() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[CategoryKey::Places], vec![]);
    engine.start_round().expect("Valid round");

    assert_eq!(engine.next_player(), None);
    assert_eq!(*engine.round().expect("round").current_reveal_index(), Some(0));
}

#[test]
fn test_imposter_sees_notice_others_see_word() {
    let names = ["Ali", "Sara", "Omar", "Huda"];
    let mut engine = engine_with(&names, &[CategoryKey::Jobs], vec![0, 0, 2]);
    engine.start_round().expect("Valid round");

    let mut cards = Vec::new();
    for _ in 0..names.len() {
        engine.show_secret();
        cards.push(engine.current_card().expect("Card shown"));
        engine.next_player();
    }

    let imposters: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == SecretCard::Imposter)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(imposters, vec![2]);
    for (i, card) in cards.iter().enumerate() {
        if i != 2 {
            assert_eq!(card, &SecretCard::Word("Pilot".to_string()));
        }
    }
}

#[test]
fn test_imposter_hidden_until_confirmed() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[CategoryKey::Places], vec![0, 0, 2]);
    engine.start_round().expect("Valid round");
    for _ in 0..3 {
        engine.show_secret();
        engine.next_player();
    }
    assert_eq!(engine.phase(), Phase::Discussion);
    assert!(engine.imposter().is_none());

    assert!(engine.request_reveal_imposter());
    engine.dismiss();
    assert!(!engine.imposter_visible());

    assert!(engine.request_reveal_imposter());
    assert_eq!(engine.confirm(), Some(ConfirmAction::RevealImposter));
    assert_eq!(engine.imposter().map(|p| p.name().as_str()), Some("Omar"));

    // A new round hides the imposter again.
    engine.start_round().expect("Same roster still valid");
    assert_eq!(engine.phase(), Phase::Reveal);
    assert!(!engine.imposter_visible());
}

#[test]
fn test_reset_discards_round_after_confirm() {
    let mut engine = engine_with(
        &["Ali", "Sara", "Omar"],
        &[CategoryKey::Places, CategoryKey::Jobs],
        vec![],
    );
    let before = engine.snapshot();
    engine.start_round().expect("Valid round");
    engine.show_secret();
    engine.next_player();

    assert!(engine.request_reset_to_setup());
    match engine.pending() {
        PendingAction::Confirm(dialog) => assert!(*dialog.destructive()),
        other => panic!("Expected confirmation, got {:?}", other),
    }
    // Cancelling keeps the round.
    engine.dismiss();
    assert_eq!(engine.phase(), Phase::Reveal);

    engine.request_reset_to_setup();
    assert_eq!(engine.confirm(), Some(ConfirmAction::ResetToSetup));
    assert_eq!(engine.phase(), Phase::Setup);
    assert!(engine.round().is_none());
    assert_eq!(engine.snapshot(), before);
    assert!(!engine.take_dirty());
}

#[test]
fn test_start_during_reveal_is_rejected() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[CategoryKey::Places], vec![]);
    engine.start_round().expect("Valid round");
    assert_eq!(engine.start_round(), Err(StartError::RevealUnderway));
    assert!(engine.pending().is_none());
}

#[test]
fn test_setup_locked_during_round() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[CategoryKey::Places], vec![]);
    let ali = engine.roster().players()[0].id().clone();
    engine.start_round().expect("Valid round");

    assert_eq!(engine.add_player("Late"), Err(RosterError::RoundActive));
    assert_eq!(engine.rename_player(&ali, "A"), Err(RosterError::RoundActive));
    assert!(engine.remove_player(&ali).is_err());
    assert_eq!(engine.move_player(0, 1), Err(RosterError::RoundActive));
    assert_eq!(engine.toggle_category(CategoryKey::Food), Err(RosterError::RoundActive));
    assert_eq!(engine.roster().len(), 3);
    assert!(!engine.take_dirty());
}

#[test]
fn test_roster_ops_keep_ids_unique_and_names_set() {
    let mut engine = engine_with(&[], &[CategoryKey::Places], vec![]);
    let mut ids = Vec::new();
    for name in ["Ali", " Sara ", "Omar", "Huda"] {
        ids.push(engine.add_player(name).expect("Valid name"));
    }
    assert!(engine.take_dirty());

    engine.rename_player(&ids[0], "  Ahmed ").expect("Known id");
    assert_eq!(engine.rename_player(&ids[1], "   "), Err(RosterError::EmptyName));
    engine.remove_player(&ids[2]).expect("Known id");
    assert!(matches!(
        engine.remove_player(&ids[2]),
        Err(RosterError::UnknownPlayer(_))
    ));
    let again = engine.add_player("Omar").expect("Valid name");
    assert_ne!(again, ids[2]);
    assert!(engine.move_player(0, 3).expect("In setup"));
    assert!(!engine.move_player(0, 9).expect("In setup"));

    let players = engine.roster().players();
    let unique: std::collections::HashSet<&PlayerId> = players.iter().map(|p| p.id()).collect();
    assert_eq!(unique.len(), players.len());
    assert!(players.iter().all(|p| !p.name().trim().is_empty()));
    let names: Vec<&str> = players.iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, vec!["Omar", "Sara", "Huda", "Ahmed"]);
}

#[test]
fn test_reorder_replaces_roster_order() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[CategoryKey::Places], vec![]);
    let mut order: Vec<Player> = engine.roster().players().to_vec();
    order.reverse();
    engine.reorder_players(order).expect("Same players");
    let names: Vec<&str> = engine.roster().players().iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, vec!["Omar", "Sara", "Ali"]);

    let mut short: Vec<Player> = engine.roster().players().to_vec();
    short.pop();
    assert_eq!(engine.reorder_players(short), Err(RosterError::ReorderMismatch));
}

#[test]
fn test_toggle_category_marks_dirty() {
    let mut engine = engine_with(&["Ali"], &[CategoryKey::Places], vec![]);
    assert_eq!(engine.toggle_category(CategoryKey::Food), Ok(true));
    assert!(engine.take_dirty());
    assert!(!engine.take_dirty());
    assert!(engine.categories().is_enabled(CategoryKey::Food));
}

#[test]
fn test_confirm_without_request_keeps_round() {
    let mut engine = engine_with(&["Ali", "Sara", "Omar"], &[CategoryKey::Places], vec![]);
    engine.start_round().expect("Valid round");

    assert_eq!(engine.confirm(), None);
    assert_eq!(engine.phase(), Phase::Reveal);
    assert!(engine.round().is_some());
}
