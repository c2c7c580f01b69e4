//! Whole-game tests for the Set session wrapper.

use matchdeck::{full_deck, is_set, MatchResult, SetGame};

#[test]
fn test_deck_completeness() {
    let deck = full_deck();
    assert_eq!(deck.len(), 81);

    let mut ids: Vec<_> = deck.iter().map(|c| c.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 81);
}

/// Drive a whole game with the hint function: match and discard while a set
/// exists, deal when stuck, stop when neither is possible.
#[test]
fn test_hint_driven_playthrough() {
    let mut game = SetGame::new(42);
    let mut rounds = 0;

    loop {
        rounds += 1;
        assert!(rounds < 100, "playthrough did not terminate");

        if let Some((a, b, c)) = game.hint() {
            game.clear_hint();
            game.choose(&a);
            game.choose(&b);
            assert_eq!(game.choose(&c), MatchResult::Matched);
            game.set_match_highlight(true);
            game.discard_matched();

            // Keep the tray near twelve the way a player would
            while game.cards_in_play().len() < 12 && game.can_deal_three() {
                game.deal_three();
            }
        } else if game.can_deal_three() {
            game.deal_three();
        } else {
            break;
        }
    }

    let matched = game.discard_pile().len();
    assert_eq!(matched % 3, 0);
    assert_eq!(game.score(), (matched / 3) as i64);

    // Every card is accounted for exactly once
    let live = game.engine().all_cards().len();
    assert_eq!(live + matched, 81);

    // Whatever is left genuinely holds no set
    assert!(game.hint().is_none());
}

#[test]
fn test_session_reproducibility_across_new_games() {
    let mut a = SetGame::new(9);
    let mut b = SetGame::new(9);

    a.new_game();
    a.new_game();
    b.new_game();
    b.new_game();

    let tray_a: Vec<_> = a.cards_in_play().iter().map(|c| c.id.clone()).collect();
    let tray_b: Vec<_> = b.cards_in_play().iter().map(|c| c.id.clone()).collect();
    assert_eq!(tray_a, tray_b);
}

#[test]
fn test_score_can_go_negative() {
    let mut game = SetGame::new(42);

    // Find a dealt triple that is not a set, then deliberately pick it
    let tray: Vec<_> = game
        .cards_in_play()
        .iter()
        .map(|c| (c.id.clone(), c.content))
        .collect();
    let mut non_set = None;
    'outer: for i in 0..tray.len() {
        for j in (i + 1)..tray.len() {
            for k in (j + 1)..tray.len() {
                if !is_set(&tray[i].1, &tray[j].1, &tray[k].1) {
                    non_set = Some((tray[i].0.clone(), tray[j].0.clone(), tray[k].0.clone()));
                    break 'outer;
                }
            }
        }
    }

    let (a, b, c) = non_set.expect("a fresh tray always holds a non-set triple");
    game.choose(&a);
    game.choose(&b);
    assert_eq!(game.choose(&c), MatchResult::NotAMatch);
    game.clear_mismatch();

    assert_eq!(game.score(), -1);
}
