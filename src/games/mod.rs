//! Concrete games built on the engine.
//!
//! - `set`: the classic 81-card Set game (3-card matching)
//! - `pairs`: a Memorize-style concentration game (2-card matching)

pub mod pairs;
pub mod set;
