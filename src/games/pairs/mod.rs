//! Memorize-style pair matching.

mod game;

pub use game::{PairCard, PairGame, PairResult, PairScoring};
