//! The set-matching deck engine.
//!
//! `DeckEngine` owns every card in one game and moves them between three
//! collections: the backing deck order (`cards`), the dealt set, and the
//! discard pile. Player picks accumulate in an ordered selection of up to
//! three ids; the third pick resolves the selection against the injected
//! matching predicate and adjusts the score.
//!
//! ## Two-phase resolution
//!
//! `select_card` only mutates the selection and the score. Moving matched
//! cards to the discard pile (`delete_selected`) or resetting a mismatch
//! (`clear_selection`) are separate calls, so the caller can show the
//! highlight for a moment before the cards move. The engine has no timers;
//! the delay between the two calls belongs to the caller.
//!
//! ## Failure semantics
//!
//! Operations on ids the engine does not know are logged no-ops, never
//! errors: the UI only passes ids it already rendered. Internal invariants
//! are checked with `debug_assert!` and cost nothing in release builds.

use im::HashSet as ImHashSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::card::{Card, CardId};
use crate::core::config::{EngineConfig, DEAL_BATCH};
use crate::core::rng::DeckRng;

/// A selection resolves once it holds exactly this many cards.
pub const SELECTION_SIZE: usize = 3;

/// The matching rule, injected at construction.
///
/// Must be pure and total. For rules like Set's, it must also be invariant
/// under permutation of its three arguments.
pub type MatchFn<C> = fn(&C, &C, &C) -> bool;

/// Outcome of a `select_card` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// A third card completed the selection and it satisfies the predicate.
    Matched,
    /// A third card completed the selection and it fails the predicate.
    NotAMatch,
    /// The selection holds fewer than three cards (or the call was a no-op).
    LessThanThreeChosen,
}

/// State machine for one game of a set-matching card game.
///
/// Generic over the card content type; the engine never interprets content
/// beyond handing it to the predicate.
#[derive(Clone, Debug)]
pub struct DeckEngine<C> {
    /// Every card still in the game, in deck order. Shrinks on discard.
    cards: Vec<Card<C>>,

    /// Position of each live card in `cards`.
    index: FxHashMap<CardId, usize>,

    /// Ids currently visible to the player.
    dealt: ImHashSet<CardId>,

    /// Ids removed from play after a confirmed match.
    discarded_ids: ImHashSet<CardId>,

    /// The discarded cards themselves, in discard order.
    discarded: Vec<Card<C>>,

    /// The player's in-progress picks, in pick order.
    selected: SmallVec<[CardId; SELECTION_SIZE]>,

    /// Ids highlighted by the last hint.
    hinted: SmallVec<[CardId; SELECTION_SIZE]>,

    score: i64,
    config: EngineConfig,
    is_match: MatchFn<C>,
    rng: DeckRng,
}

impl<C: Clone + Eq + std::hash::Hash> DeckEngine<C> {
    /// Create an engine over a full deck, dealing the first
    /// `config.initial_deal` cards in deck order.
    ///
    /// Panics if the deck is smaller than the initial deal, if
    /// `initial_deal > max_deal`, or if two cards share an id.
    #[must_use]
    pub fn new(cards: Vec<Card<C>>, config: EngineConfig, is_match: MatchFn<C>, seed: u64) -> Self {
        assert!(
            cards.len() >= config.initial_deal,
            "Deck has {} cards, initial deal needs {}",
            cards.len(),
            config.initial_deal
        );
        assert!(
            config.initial_deal <= config.max_deal,
            "initial_deal must not exceed max_deal"
        );

        let mut engine = Self {
            cards,
            index: FxHashMap::default(),
            dealt: ImHashSet::new(),
            discarded_ids: ImHashSet::new(),
            discarded: Vec::new(),
            selected: SmallVec::new(),
            hinted: SmallVec::new(),
            score: 0,
            config,
            is_match,
            rng: DeckRng::new(seed),
        };

        engine.rebuild_index();
        assert_eq!(
            engine.index.len(),
            engine.cards.len(),
            "Deck contains duplicate card ids"
        );

        let initial: Vec<CardId> = engine
            .cards
            .iter()
            .take(config.initial_deal)
            .map(|c| c.id.clone())
            .collect();
        for id in initial {
            engine.dealt.insert(id);
        }

        engine
    }

    // === Selection ===

    /// Select or deselect a dealt card.
    ///
    /// The third selection resolves immediately: the score is adjusted and
    /// `Matched`/`NotAMatch` is returned, but the cards stay where they are
    /// until the caller follows up with `delete_selected` or
    /// `clear_selection`. While the selection is full, further calls refuse
    /// to mutate and re-report the standing resolution.
    ///
    /// Ids that are not currently dealt are logged no-ops.
    pub fn select_card(&mut self, id: &CardId) -> MatchResult {
        if !self.dealt.contains(id) {
            debug!(card = %id, "select ignored: card not dealt");
            return MatchResult::LessThanThreeChosen;
        }

        if self.selected.len() == SELECTION_SIZE {
            // Locked until the caller clears or discards.
            return self.evaluate_selection();
        }

        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            if let Some(card) = self.card_mut(id) {
                card.is_chosen = false;
            }
            return MatchResult::LessThanThreeChosen;
        }

        self.selected.push(id.clone());
        if let Some(card) = self.card_mut(id) {
            card.is_chosen = true;
        }

        let result = if self.selected.len() == SELECTION_SIZE {
            let result = self.evaluate_selection();
            match result {
                MatchResult::Matched => self.score += self.config.scoring.match_reward,
                MatchResult::NotAMatch => self.score -= self.config.scoring.mismatch_penalty,
                MatchResult::LessThanThreeChosen => {}
            }
            result
        } else {
            MatchResult::LessThanThreeChosen
        };

        self.debug_check_invariants();
        result
    }

    /// Run the predicate over the full selection without touching the score.
    fn evaluate_selection(&self) -> MatchResult {
        debug_assert_eq!(self.selected.len(), SELECTION_SIZE);

        let contents: SmallVec<[&C; SELECTION_SIZE]> = self
            .selected
            .iter()
            .filter_map(|id| self.card(id).map(|c| &c.content))
            .collect();

        if contents.len() < SELECTION_SIZE {
            debug_assert!(false, "selection refers to a card not in the deck");
            return MatchResult::LessThanThreeChosen;
        }

        if (self.is_match)(contents[0], contents[1], contents[2]) {
            MatchResult::Matched
        } else {
            MatchResult::NotAMatch
        }
    }

    /// Set `is_in_matching_set` on every selected card. Idempotent.
    pub fn set_match_highlight(&mut self, on: bool) {
        let ids = self.selected.clone();
        for id in &ids {
            if let Some(card) = self.card_mut(id) {
                card.is_in_matching_set = on;
            }
        }
    }

    /// Set `is_in_non_matching_set` on every selected card. Idempotent.
    pub fn set_mismatch_highlight(&mut self, on: bool) {
        let ids = self.selected.clone();
        for id in &ids {
            if let Some(card) = self.card_mut(id) {
                card.is_in_non_matching_set = on;
            }
        }
    }

    /// Reset `is_chosen` on the selected cards and empty the selection
    /// without discarding anything. Used after a confirmed mismatch.
    pub fn clear_selection(&mut self) {
        let ids = std::mem::take(&mut self.selected);
        for id in &ids {
            if let Some(card) = self.card_mut(id) {
                card.is_chosen = false;
                card.is_in_non_matching_set = false;
            }
        }
    }

    /// Move every selected card to the discard pile and empty the selection.
    ///
    /// Flags are cleared as cards leave play. If exactly three cards were
    /// removed and the engine is configured to auto-replenish, the next
    /// batch is dealt immediately. Safe to call with an empty selection.
    pub fn delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }

        let ids = std::mem::take(&mut self.selected);
        let mut removed = 0;
        for id in &ids {
            let Some(pos) = self.index.get(id).copied() else {
                debug!(card = %id, "discard ignored: unknown card");
                continue;
            };
            let mut card = self.cards.remove(pos);
            card.clear_flags();
            self.dealt.remove(id);
            self.discarded_ids.insert(id.clone());
            self.discarded.push(card);
            self.rebuild_index();
            removed += 1;
        }

        if self.config.auto_replenish && removed == SELECTION_SIZE {
            self.deal_more();
        }

        self.debug_check_invariants();
    }

    // === Dealing ===

    /// True if another batch can be dealt: the tray is below the cap and the
    /// deck still holds undealt cards.
    #[must_use]
    pub fn can_deal_more(&self) -> bool {
        self.dealt.len() < self.config.max_deal && self.cards.len() > self.dealt.len()
    }

    /// Deal the next batch of up to three undealt cards, in deck order.
    ///
    /// A no-op (logged) when the tray is at the cap or the deck is exhausted.
    pub fn deal_more(&mut self) {
        if !self.can_deal_more() {
            debug!(
                dealt = self.dealt.len(),
                deck = self.cards.len(),
                "deal ignored: tray full or deck exhausted"
            );
            return;
        }

        let room = self.config.max_deal - self.dealt.len();
        let next: Vec<CardId> = self
            .cards
            .iter()
            .map(|c| &c.id)
            .filter(|id| !self.dealt.contains(*id))
            .take(DEAL_BATCH.min(room))
            .cloned()
            .collect();
        for id in next {
            self.dealt.insert(id);
        }

        self.debug_check_invariants();
    }

    // === Shuffling ===

    /// Randomly permute the entire backing order.
    ///
    /// Membership of the dealt and discarded sets is untouched; only the
    /// order future deals draw from changes.
    pub fn shuffle_all(&mut self) {
        self.rng.shuffle(&mut self.cards);
        self.rebuild_index();
        self.debug_check_invariants();
    }

    /// Randomly permute the dealt cards' relative order within the backing
    /// sequence, leaving every undealt card in place.
    ///
    /// Cosmetic "shuffle the tray" action; never moves a card into or out of
    /// the dealt set.
    pub fn shuffle_dealt(&mut self) {
        let positions: Vec<usize> = (0..self.cards.len())
            .filter(|&i| self.dealt.contains(&self.cards[i].id))
            .collect();

        let mut tray: Vec<Card<C>> = positions.iter().map(|&p| self.cards[p].clone()).collect();
        self.rng.shuffle(&mut tray);
        for (&p, card) in positions.iter().zip(tray) {
            self.cards[p] = card;
        }

        self.rebuild_index();
        self.debug_check_invariants();
    }

    // === Hinting ===

    /// Find one valid triple among the dealt cards.
    ///
    /// Clears any in-progress selection first: a hint request supersedes an
    /// incomplete manual selection. Searches all i<j<k combinations in deck
    /// order (n <= 18, so at most 816 predicate calls) and returns the first
    /// triple the predicate accepts. Mutates no card flags; highlighting is
    /// the caller's separate `set_hint` step.
    pub fn find_hint_triple(&mut self) -> Option<(CardId, CardId, CardId)> {
        self.clear_selection();

        let positions: Vec<usize> = (0..self.cards.len())
            .filter(|&i| self.dealt.contains(&self.cards[i].id))
            .collect();

        let n = positions.len();
        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let (a, b, c) = (
                        &self.cards[positions[i]],
                        &self.cards[positions[j]],
                        &self.cards[positions[k]],
                    );
                    if (self.is_match)(&a.content, &b.content, &c.content) {
                        return Some((a.id.clone(), b.id.clone(), c.id.clone()));
                    }
                }
            }
        }

        None
    }

    /// Set `is_hinted` on the given cards.
    ///
    /// When turning hints on, the ids are remembered so `clear_hints` can
    /// turn them off without the caller re-supplying them. Unknown ids are
    /// logged no-ops.
    pub fn set_hint(&mut self, ids: &[CardId], on: bool) {
        for id in ids {
            match self.card_mut(id) {
                Some(card) => card.is_hinted = on,
                None => debug!(card = %id, "hint ignored: unknown card"),
            }
        }

        if on {
            self.hinted = ids.iter().cloned().collect();
        } else {
            self.hinted.retain(|h| !ids.contains(h));
        }
    }

    /// Turn off every hint set by the last `set_hint` call.
    pub fn clear_hints(&mut self) {
        let ids = std::mem::take(&mut self.hinted);
        for id in &ids {
            if let Some(card) = self.card_mut(id) {
                card.is_hinted = false;
            }
        }
    }

    // === Queries ===

    /// Every card still in the game, in deck order.
    #[must_use]
    pub fn all_cards(&self) -> &[Card<C>] {
        &self.cards
    }

    /// The dealt cards, in deck order.
    #[must_use]
    pub fn dealt_cards(&self) -> Vec<&Card<C>> {
        self.cards
            .iter()
            .filter(|c| self.dealt.contains(&c.id))
            .collect()
    }

    /// The discard pile, in discard order.
    #[must_use]
    pub fn discarded_cards(&self) -> &[Card<C>] {
        &self.discarded
    }

    /// Look up a live card by id.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card<C>> {
        self.index.get(id).and_then(|&pos| self.cards.get(pos))
    }

    /// Number of dealt cards.
    #[must_use]
    pub fn dealt_count(&self) -> usize {
        self.dealt.len()
    }

    /// Cards still in the deck and not yet dealt.
    #[must_use]
    pub fn remaining_deck_size(&self) -> usize {
        self.cards.len() - self.dealt.len()
    }

    /// Current score. May be negative.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The in-progress selection, in pick order.
    #[must_use]
    pub fn selected_ids(&self) -> &[CardId] {
        &self.selected
    }

    /// Ids highlighted by the last hint.
    #[must_use]
    pub fn hinted_ids(&self) -> &[CardId] {
        &self.hinted
    }

    /// True if the id is currently dealt.
    #[must_use]
    pub fn is_dealt(&self, id: &CardId) -> bool {
        self.dealt.contains(id)
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Internals ===

    fn card_mut(&mut self, id: &CardId) -> Option<&mut Card<C>> {
        let pos = *self.index.get(id)?;
        self.cards.get_mut(pos)
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, card) in self.cards.iter().enumerate() {
            self.index.insert(card.id.clone(), pos);
        }
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.selected.len() <= SELECTION_SIZE);
        debug_assert!(
            self.dealt.iter().all(|id| self.index.contains_key(id)),
            "dealt id without a backing card"
        );
        debug_assert!(
            self.dealt.iter().all(|id| !self.discarded_ids.contains(id)),
            "card is both dealt and discarded"
        );
        debug_assert!(
            self.selected.iter().all(|id| self.dealt.contains(id)),
            "selected id is not dealt"
        );
    }
}
