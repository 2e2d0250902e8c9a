//! Player interaction resources
//!
//! Who controls each side, and the pawn promotion handshake.

use crate::game::types::Side;
use serde::{Deserialize, Serialize};

pub mod promotion;
pub use promotion::*;

/// Control type of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    Ai,
}

impl PlayerKind {
    pub fn is_ai(self) -> bool {
        self == PlayerKind::Ai
    }
}

/// Control types of both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Players {
    pub white: PlayerKind,
    pub black: PlayerKind,
}

impl Players {
    pub fn get(&self, side: Side) -> PlayerKind {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// True when at least one side is engine-driven
    pub fn has_ai(&self) -> bool {
        self.white.is_ai() || self.black.is_ai()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_players_lookup() {
        let players = Players {
            white: PlayerKind::Human,
            black: PlayerKind::Ai,
        };
        assert_eq!(players.get(Side::White), PlayerKind::Human);
        assert!(players.get(Side::Black).is_ai());
        assert!(players.has_ai());

        let hot_seat = Players {
            white: PlayerKind::Human,
            black: PlayerKind::Human,
        };
        assert!(!hot_seat.has_ai());
    }
}
