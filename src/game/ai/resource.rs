//! AI difficulty settings
//!
//! Difficulty is expressed as a fixed search depth handed to the engine's
//! best-move call.
//!
//! | Difficulty | Depth |
//! |------------|-------|
//! | Easy       | 1 ply |
//! | Medium     | 3 ply |
//! | Hard       | 5 ply |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AI difficulty levels corresponding to search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AIDifficulty {
    /// Depth 1 - plays the best immediate reply
    Easy,
    /// Depth 3 - the default
    #[default]
    Medium,
    /// Depth 5 - noticeably slower on large middlegames
    Hard,
}

impl AIDifficulty {
    pub fn search_depth(self) -> u8 {
        match self {
            AIDifficulty::Easy => 1,
            AIDifficulty::Medium => 3,
            AIDifficulty::Hard => 5,
        }
    }
}

impl fmt::Display for AIDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AIDifficulty::Easy => write!(f, "Easy"),
            AIDifficulty::Medium => write!(f, "Medium"),
            AIDifficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for AIDifficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(AIDifficulty::Easy),
            "medium" => Ok(AIDifficulty::Medium),
            "hard" => Ok(AIDifficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_increases_with_difficulty() {
        //! Verifies harder difficulties search deeper
        assert_eq!(AIDifficulty::Easy.search_depth(), 1);
        assert_eq!(AIDifficulty::Medium.search_depth(), 3);
        assert_eq!(AIDifficulty::Hard.search_depth(), 5);
    }

    #[test]
    fn test_default_is_medium() {
        assert_eq!(AIDifficulty::default(), AIDifficulty::Medium);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Easy".parse::<AIDifficulty>(), Ok(AIDifficulty::Easy));
        assert_eq!(" HARD ".parse::<AIDifficulty>(), Ok(AIDifficulty::Hard));
        assert!("grandmaster".parse::<AIDifficulty>().is_err());
    }
}
