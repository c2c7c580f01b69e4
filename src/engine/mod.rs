//! The deck engine: deal/selection/discard state machine.
//!
//! `DeckEngine` is the single owner of one game's card state. It is called
//! synchronously by a presentation layer and never schedules work of its
//! own; highlight-then-resolve sequences are two independent calls with the
//! delay owned entirely by the caller.

pub mod deck;

pub use deck::{DeckEngine, MatchFn, MatchResult, SELECTION_SIZE};
