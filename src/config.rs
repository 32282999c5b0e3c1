//! Configuration for a [GameController](crate::controller::GameController).
//!
//! Every field has a default, so a config file only needs to list what it changes:
//!
//! ```
//! use ultimate_ttt::ai::difficulty::Difficulty;
//! use ultimate_ttt::config::ControllerConfig;
//!
//! let config = ControllerConfig::from_json(r#"{ "difficulty": "hard", "search": { "hard_depth": 4 } }"#).unwrap();
//! assert_eq!(config.difficulty, Difficulty::Hard);
//! assert_eq!(config.search.depth(Difficulty::Hard), 4);
//! assert_eq!(config.search.depth(Difficulty::Easy), 1);
//! ```
use serde::{Deserialize, Serialize};

use crate::ai::difficulty::{Difficulty, SearchConfig};
use crate::board::Mark;

/// The default move limit, see [GameState::with_max_moves](crate::games::uttt::GameState::with_max_moves).
pub const DEFAULT_MAX_MOVES: u32 = 200;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth for {0:?} must be positive")]
    ZeroDepth(Difficulty),
    #[error("random move probability {0} is not between 0 and 1")]
    InvalidProbability(f64),
    #[error("move limit must be positive")]
    ZeroMoveLimit,
    #[error("malformed config json")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// The mark played by the bot, `None` if both sides are played by humans.
    pub bot: Option<Mark>,
    pub difficulty: Difficulty,
    /// Games that reach this many moves without a winner are drawn, `None` to play on forever.
    pub max_moves: Option<u32>,
    pub search: SearchConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            bot: Some(Mark::O),
            difficulty: Difficulty::Medium,
            max_moves: Some(DEFAULT_MAX_MOVES),
            search: SearchConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_moves == Some(0) {
            return Err(ConfigError::ZeroMoveLimit);
        }
        self.search.validate()
    }
}
