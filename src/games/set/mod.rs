//! The classic Set game.
//!
//! Content (`SetFace`, the 81-card deck, the all-same-or-all-different
//! predicate) plus a thin session wrapper over the deck engine.

mod content;
mod game;

pub use content::{full_deck, is_set, SetColor, SetFace, SetShading, SetShape};
pub use game::SetGame;
