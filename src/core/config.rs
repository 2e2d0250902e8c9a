//! Game launch configuration
//!
//! [`GameConfig`] fixes everything about a game that does not change once it
//! has started: who controls each side, which side is drawn at the bottom,
//! the AI difficulty and the clock length.
//!
//! Configs round-trip through JSON:
//!
//! ```json
//! {
//!   "white": "human",
//!   "black": "ai",
//!   "bottom_is_white": true,
//!   "difficulty": "medium",
//!   "timer_minutes": 10
//! }
//! ```
//!
//! Missing fields fall back to [`GameConfig::default`].

use crate::core::error::{CoreError, CoreResult};
use crate::game::ai::AIDifficulty;
use crate::game::resources::player::{PlayerKind, Players};
use crate::game::types::Side;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Clock lengths offered by the launch menu, in minutes
pub const TIMER_OPTIONS: [u32; 7] = [1, 3, 5, 10, 15, 30, 60];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// White is drawn at the bottom; `false` flips the board
    pub bottom_is_white: bool,
    pub difficulty: AIDifficulty,
    pub timer_minutes: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            white: PlayerKind::Human,
            black: PlayerKind::Ai,
            bottom_is_white: true,
            difficulty: AIDifficulty::Medium,
            timer_minutes: 10,
        }
    }
}

impl GameConfig {
    /// Two humans sharing the board
    pub fn hot_seat() -> Self {
        Self {
            black: PlayerKind::Human,
            ..Self::default()
        }
    }

    pub fn flipped(&self) -> bool {
        !self.bottom_is_white
    }

    pub fn players(&self) -> Players {
        Players {
            white: self.white,
            black: self.black,
        }
    }

    pub fn is_ai_game(&self) -> bool {
        self.players().has_ai()
    }

    pub fn player(&self, side: Side) -> PlayerKind {
        self.players().get(side)
    }

    pub fn is_ai(&self, side: Side) -> bool {
        self.player(side).is_ai()
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !TIMER_OPTIONS.contains(&self.timer_minutes) {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "timer_minutes must be one of {:?}, got {}",
                    TIMER_OPTIONS, self.timer_minutes
                ),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        info!("[CONFIG] Loaded game config from {:?}", path);
        Ok(config)
    }

    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Nearest allowed clock length; ties go to the shorter option
pub fn snap_timer_minutes(minutes: u32) -> u32 {
    TIMER_OPTIONS
        .iter()
        .copied()
        .min_by_key(|option| option.abs_diff(minutes))
        .unwrap_or(10)
}
