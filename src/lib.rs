//! # matchdeck
//!
//! A set-matching deck engine for casual card-matching games.
//!
//! ## Design Principles
//!
//! 1. **Content-Agnostic**: The engine never interprets card content. Games
//!    supply a content type and a matching predicate at construction.
//!
//! 2. **Synchronous and Single-Owner**: Every operation fully applies before
//!    returning. The engine has no timers or callbacks; highlight-then-
//!    resolve sequences are two independent calls with the delay owned by
//!    the presentation layer.
//!
//! 3. **Configuration Over Convention**: Deal sizes, scoring, and the
//!    replenish policy come from `EngineConfig`, not hardcoded rules.
//!
//! ## Architecture
//!
//! - **Deterministic Shuffling**: All randomness flows through a seeded
//!   `DeckRng`, so whole sessions are reproducible from one seed.
//!
//! - **Forgiving Boundary**: Operations on ids the engine does not know are
//!   logged no-ops, never errors - the UI only passes ids it rendered.
//!
//! ## Modules
//!
//! - `core`: Cards, configuration, RNG
//! - `engine`: The deal/selection/discard state machine
//! - `games`: The Set game (81-card deck, triple matching) and a
//!   Memorize-style pair game

pub mod core;
pub mod engine;
pub mod games;

// Re-export commonly used types
pub use crate::core::{Card, CardId, DeckRng, EngineConfig, ScoringPolicy, DEAL_BATCH};

pub use crate::engine::{DeckEngine, MatchFn, MatchResult, SELECTION_SIZE};

pub use crate::games::pairs::{PairCard, PairGame, PairResult, PairScoring};
pub use crate::games::set::{full_deck, is_set, SetColor, SetFace, SetGame, SetShading, SetShape};
