//! Cards: stable identity, generic content, transient presentation flags.
//!
//! A `Card` is created once at game start and never destroyed individually;
//! it only moves between collections (deck, dealt, discard pile). The four
//! boolean flags exist purely for the presentation layer and default to
//! false.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card, stable for its lifetime.
///
/// Ids come from the deck factory (e.g. `"2-oval-striped-green"`) and are
/// never reused within a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Create a new card id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card in a game: immutable identity and content, mutable UI flags.
///
/// `C` is the game-specific content type. The engine only requires equality
/// and hashing; it never interprets the content beyond passing it to the
/// injected matching predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card<C> {
    /// Stable unique id.
    pub id: CardId,

    /// Game-specific content (e.g. a Set card's four features).
    pub content: C,

    /// Currently part of the player's selection.
    #[serde(default)]
    pub is_chosen: bool,

    /// Currently highlighted by the hint.
    #[serde(default)]
    pub is_hinted: bool,

    /// Part of a selection confirmed as a match (highlight phase).
    #[serde(default)]
    pub is_in_matching_set: bool,

    /// Part of a selection confirmed as a mismatch (highlight phase).
    #[serde(default)]
    pub is_in_non_matching_set: bool,
}

impl<C> Card<C> {
    /// Create a card with all flags false.
    #[must_use]
    pub fn new(id: impl Into<CardId>, content: C) -> Self {
        Self {
            id: id.into(),
            content,
            is_chosen: false,
            is_hinted: false,
            is_in_matching_set: false,
            is_in_non_matching_set: false,
        }
    }

    /// Reset every transient flag to false.
    pub fn clear_flags(&mut self) {
        self.is_chosen = false;
        self.is_hinted = false;
        self.is_in_matching_set = false;
        self.is_in_non_matching_set = false;
    }

    /// True if any transient flag is set.
    #[must_use]
    pub fn has_any_flag(&self) -> bool {
        self.is_chosen || self.is_hinted || self.is_in_matching_set || self.is_in_non_matching_set
    }
}
