//! Engine configuration types.
//!
//! Games configure the engine at startup rather than the engine hardcoding
//! game rules:
//! - `ScoringPolicy`: rewards and penalties applied on resolution
//! - `EngineConfig`: deal sizes and the replenish policy
//!
//! Defaults match the classic Set game (deal 12, cap at 18, ±1 scoring).

use serde::{Deserialize, Serialize};

/// How many cards each `deal_more` call moves into play.
pub const DEAL_BATCH: usize = 3;

/// Scoring applied when a full selection resolves.
///
/// The mismatch penalty is unconditional. The conditional "already seen"
/// penalty is a property of the pair engine only (`games::pairs`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Added to the score on a confirmed match.
    pub match_reward: i64,

    /// Subtracted from the score on a confirmed mismatch.
    pub mismatch_penalty: i64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            match_reward: 1,
            mismatch_penalty: 1,
        }
    }
}

/// Configuration for a `DeckEngine`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cards dealt when the game starts.
    pub initial_deal: usize,

    /// Cap on simultaneously dealt cards.
    pub max_deal: usize,

    /// Deal replacements automatically after a 3-card discard.
    pub auto_replenish: bool,

    /// Resolution scoring.
    pub scoring: ScoringPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_deal: 12,
            max_deal: 18,
            auto_replenish: false,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Create a config with the given deal sizes and default scoring.
    #[must_use]
    pub fn new(initial_deal: usize, max_deal: usize) -> Self {
        Self {
            initial_deal,
            max_deal,
            ..Self::default()
        }
    }

    /// Set the scoring policy.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Enable automatic replenishment after a 3-card discard.
    #[must_use]
    pub fn auto_replenish(mut self) -> Self {
        self.auto_replenish = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.initial_deal, 12);
        assert_eq!(config.max_deal, 18);
        assert!(!config.auto_replenish);
        assert_eq!(config.scoring.match_reward, 1);
        assert_eq!(config.scoring.mismatch_penalty, 1);
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::new(9, 15)
            .with_scoring(ScoringPolicy {
                match_reward: 2,
                mismatch_penalty: 1,
            })
            .auto_replenish();

        assert_eq!(config.initial_deal, 9);
        assert_eq!(config.max_deal, 15);
        assert!(config.auto_replenish);
        assert_eq!(config.scoring.match_reward, 2);
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
