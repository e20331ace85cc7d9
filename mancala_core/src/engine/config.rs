use crate::engine::eval::{Heuristic, Weights};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error("invalid {field} range: {min} > {max}")]
    InvalidRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
    #[error("unknown side `{0}`, expected `top` or `bottom`")]
    UnknownSide(String),
    #[error("unknown heuristic `{0}`, expected h1, h2, h3 or h4")]
    UnknownHeuristic(String),
}

/// Settings for one searching agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies to search. A bonus-turn move does not use up a ply.
    pub depth: u8,
    pub heuristic: Heuristic,
    pub weights: Weights,
    /// Alpha-beta cutoffs. Disabling them gives plain minimax over the same tree.
    pub pruning: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            heuristic: Heuristic::default(),
            weights: Weights::default(),
            pruning: true,
        }
    }
}

impl EngineConfig {
    pub const fn new(depth: u8, heuristic: Heuristic, weights: Weights) -> Self {
        Self {
            depth,
            heuristic,
            weights,
            pruning: true,
        }
    }

    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}
