//! Concentration-style pair matching.
//!
//! The simpler sibling of the deck engine: every card stays on the table,
//! selection is two cards deep, and matching is plain content equality. The
//! scoring quirk it keeps from the original game is the "already seen"
//! penalty: a mismatch only costs a point when the chosen card had been
//! face up before.
//!
//! Like the deck engine, resolution is two-phase: `choose` resolves and
//! scores, but mismatched cards stay face up until the caller's delayed
//! `turn_down_unmatched` call flips them back.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::card::CardId;
use crate::core::rng::DeckRng;

/// Outcome of a `choose` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairResult {
    /// The card became the first of a potential pair (or the call was a
    /// no-op).
    FirstOfPair,
    /// The second card's content equals the first's.
    Matched,
    /// The second card's content differs from the first's.
    NotAMatch,
}

/// Scoring for the pair game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairScoring {
    /// Added on a matched pair.
    pub match_reward: i64,

    /// Subtracted on a mismatch, but only when the chosen card had already
    /// been face up earlier in the game.
    pub seen_mismatch_penalty: i64,
}

impl Default for PairScoring {
    fn default() -> Self {
        Self {
            match_reward: 2,
            seen_mismatch_penalty: 1,
        }
    }
}

/// One card on the pairs table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairCard<C> {
    pub id: CardId,
    pub content: C,
    pub is_face_up: bool,
    pub is_matched: bool,
    /// Was face up at some earlier point and got flipped back down.
    pub seen: bool,
}

impl<C> PairCard<C> {
    fn new(id: impl Into<CardId>, content: C) -> Self {
        Self {
            id: id.into(),
            content,
            is_face_up: false,
            is_matched: false,
            seen: false,
        }
    }
}

/// State machine for one game of pair matching.
///
/// The single face-up unmatched card is tracked explicitly in `selected`
/// rather than recomputed from the card flags, so the state generalizes the
/// same way the deck engine's selection list does.
#[derive(Clone, Debug)]
pub struct PairGame<C> {
    cards: Vec<PairCard<C>>,
    index: FxHashMap<CardId, usize>,
    selected: Option<CardId>,
    score: i64,
    scoring: PairScoring,
    rng: DeckRng,
}

impl<C: Clone + Eq> PairGame<C> {
    /// Build a game of `pairs` content pairs (at least 2 enforced), two
    /// cards per pair with ids `"{i}a"` and `"{i}b"`.
    ///
    /// The table is left in factory order; call `shuffle` to randomize it.
    #[must_use]
    pub fn new(pairs: usize, factory: impl Fn(usize) -> C, seed: u64) -> Self {
        let pairs = pairs.max(2);

        let mut cards = Vec::with_capacity(pairs * 2);
        for pair_index in 0..pairs {
            let content = factory(pair_index);
            cards.push(PairCard::new(format!("{pair_index}a"), content.clone()));
            cards.push(PairCard::new(format!("{pair_index}b"), content));
        }

        let mut game = Self {
            cards,
            index: FxHashMap::default(),
            selected: None,
            score: 0,
            scoring: PairScoring::default(),
            rng: DeckRng::new(seed),
        };
        game.rebuild_index();
        game
    }

    /// Set the scoring policy.
    #[must_use]
    pub fn with_scoring(mut self, scoring: PairScoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Flip a face-down card.
    ///
    /// The first pick of a pair flips any lingering unmatched cards back
    /// down (marking them seen) and becomes the selection. The second pick
    /// resolves: equal content marks both cards matched and scores the
    /// reward; unequal content scores the seen-mismatch penalty if the
    /// chosen card had been seen before. Either way both cards stay face up
    /// until `turn_down_unmatched`.
    ///
    /// Face-up, matched, or unknown cards are logged no-ops returning
    /// `FirstOfPair`.
    pub fn choose(&mut self, id: &CardId) -> PairResult {
        let Some(&pos) = self.index.get(id) else {
            debug!(card = %id, "choose ignored: unknown card");
            return PairResult::FirstOfPair;
        };
        if self.cards[pos].is_face_up || self.cards[pos].is_matched {
            return PairResult::FirstOfPair;
        }

        match self.selected.take() {
            Some(prev_id) => {
                self.cards[pos].is_face_up = true;
                let prev = self.index[&prev_id];
                if self.cards[pos].content == self.cards[prev].content {
                    self.cards[pos].is_matched = true;
                    self.cards[prev].is_matched = true;
                    self.score += self.scoring.match_reward;
                    PairResult::Matched
                } else {
                    if self.cards[pos].seen {
                        self.score -= self.scoring.seen_mismatch_penalty;
                    }
                    PairResult::NotAMatch
                }
            }
            None => {
                self.turn_down_unmatched();
                self.cards[pos].is_face_up = true;
                self.selected = Some(id.clone());
                PairResult::FirstOfPair
            }
        }
    }

    /// Flip every unmatched face-up card back down, marking it seen.
    ///
    /// Called by the presentation layer after the mismatch feedback window;
    /// also runs defensively before a new first pick.
    pub fn turn_down_unmatched(&mut self) {
        for card in &mut self.cards {
            if card.is_face_up && !card.is_matched {
                card.is_face_up = false;
                card.seen = true;
            }
        }
    }

    /// Randomly permute the table.
    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.cards);
        self.rebuild_index();
    }

    // === Queries ===

    /// All cards in table order.
    #[must_use]
    pub fn cards(&self) -> &[PairCard<C>] {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&PairCard<C>> {
        self.index.get(id).and_then(|&pos| self.cards.get(pos))
    }

    /// Current score. May be negative.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The first-of-pair selection, if one is pending.
    #[must_use]
    pub fn selected_id(&self) -> Option<&CardId> {
        self.selected.as_ref()
    }

    /// True once every card is matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|c| c.is_matched)
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, card) in self.cards.iter().enumerate() {
            self.index.insert(card.id.clone(), pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(pairs: usize) -> PairGame<usize> {
        PairGame::new(pairs, |i| i, 42)
    }

    fn id(s: &str) -> CardId {
        CardId::new(s)
    }

    #[test]
    fn test_new_builds_two_cards_per_pair() {
        let game = game(3);

        assert_eq!(game.cards().len(), 6);
        assert_eq!(game.card(&id("0a")).unwrap().content, 0);
        assert_eq!(game.card(&id("0b")).unwrap().content, 0);
        assert_eq!(game.card(&id("2b")).unwrap().content, 2);
        assert!(game.cards().iter().all(|c| !c.is_face_up && !c.is_matched));
    }

    #[test]
    fn test_minimum_two_pairs() {
        let game = game(0);
        assert_eq!(game.cards().len(), 4);
    }

    #[test]
    fn test_matching_pair_scores_reward() {
        let mut game = game(3);

        assert_eq!(game.choose(&id("0a")), PairResult::FirstOfPair);
        assert_eq!(game.choose(&id("0b")), PairResult::Matched);

        assert_eq!(game.score(), 2);
        assert!(game.card(&id("0a")).unwrap().is_matched);
        assert!(game.card(&id("0b")).unwrap().is_matched);
        // Matched cards stay face up
        assert!(game.card(&id("0a")).unwrap().is_face_up);
    }

    #[test]
    fn test_unseen_mismatch_costs_nothing() {
        let mut game = game(3);

        game.choose(&id("0a"));
        assert_eq!(game.choose(&id("1a")), PairResult::NotAMatch);
        assert_eq!(game.score(), 0);

        // Both stay face up until the caller turns them down
        assert!(game.card(&id("0a")).unwrap().is_face_up);
        assert!(game.card(&id("1a")).unwrap().is_face_up);
    }

    #[test]
    fn test_seen_mismatch_is_penalized() {
        let mut game = game(3);

        game.choose(&id("0a"));
        game.choose(&id("1a")); // mismatch, no penalty yet
        game.turn_down_unmatched(); // 0a and 1a are now seen

        game.choose(&id("0b"));
        assert_eq!(game.choose(&id("1a")), PairResult::NotAMatch);
        assert_eq!(game.score(), -1); // 1a had been seen

        game.turn_down_unmatched();
        game.choose(&id("0a"));
        assert_eq!(game.choose(&id("0b")), PairResult::Matched);
        assert_eq!(game.score(), 1); // -1 + 2
    }

    #[test]
    fn test_first_pick_turns_down_lingering_cards() {
        let mut game = game(3);

        game.choose(&id("0a"));
        game.choose(&id("1a")); // mismatch, both face up

        // No explicit turn_down_unmatched; the next first pick handles it
        assert_eq!(game.choose(&id("2a")), PairResult::FirstOfPair);

        let a0 = game.card(&id("0a")).unwrap();
        assert!(!a0.is_face_up);
        assert!(a0.seen);
        assert!(game.card(&id("2a")).unwrap().is_face_up);
    }

    #[test]
    fn test_face_up_and_matched_cards_are_noops() {
        let mut game = game(3);

        game.choose(&id("0a"));
        // Choosing the same card again does not resolve anything
        assert_eq!(game.choose(&id("0a")), PairResult::FirstOfPair);
        assert_eq!(game.selected_id(), Some(&id("0a")));

        game.choose(&id("0b")); // matched
        assert_eq!(game.choose(&id("0b")), PairResult::FirstOfPair);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut game = game(3);
        assert_eq!(game.choose(&id("ghost")), PairResult::FirstOfPair);
        assert!(game.selected_id().is_none());
    }

    #[test]
    fn test_completion() {
        let mut game = game(2);

        game.choose(&id("0a"));
        game.choose(&id("0b"));
        assert!(!game.is_complete());

        game.choose(&id("1a"));
        game.choose(&id("1b"));
        assert!(game.is_complete());
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_shuffle_preserves_cards() {
        let mut game = game(10);
        let mut before: Vec<_> = game.cards().iter().map(|c| c.id.clone()).collect();

        game.shuffle();

        let shuffled: Vec<_> = game.cards().iter().map(|c| c.id.clone()).collect();
        assert_ne!(before, shuffled);

        let mut after = shuffled;
        before.sort();
        after.sort();
        assert_eq!(before, after);

        // Index still resolves every card
        assert_eq!(game.card(&id("7b")).unwrap().id, id("7b"));
    }

    #[test]
    fn test_custom_scoring() {
        let mut game = PairGame::new(2, |i| i, 42).with_scoring(PairScoring {
            match_reward: 5,
            seen_mismatch_penalty: 3,
        });

        game.choose(&id("0a"));
        game.choose(&id("0b"));
        assert_eq!(game.score(), 5);
    }
}
