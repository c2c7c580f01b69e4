//! Core types: cards, configuration, RNG.
//!
//! This module contains the fundamental building blocks that are
//! game-agnostic. Games supply content types and predicates via
//! `EngineConfig` and the engine constructor rather than modifying the core.

pub mod card;
pub mod config;
pub mod rng;

pub use card::{Card, CardId};
pub use config::{EngineConfig, ScoringPolicy, DEAL_BATCH};
pub use rng::DeckRng;
