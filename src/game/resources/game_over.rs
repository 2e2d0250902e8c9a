//! Game lifecycle and end-of-game results
//!
//! A game is [`GameLifecycle::Ongoing`] until the engine reports a terminal
//! state or a player resigns. [`GameLifecycle::Terminal`] is absorbing: no
//! further moves are accepted and no second game-over event is ever emitted.
//!
//! ```text
//! Ongoing --(ongoing / check)--> Ongoing
//! Ongoing --(mate / stalemate / draw_* / resign)--> Terminal(reason)
//! ```

use crate::game::resources::engine::GameState;
use crate::game::types::Side;

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    Checkmate { winner: Side },
    Stalemate,
    DrawRepetition,
    DrawFiftyMove,
    DrawInsufficientMaterial,
    Resignation { loser: Side },
}

impl GameOverReason {
    /// Maps a terminal engine state to a reason
    ///
    /// `side_to_move` is the side to move in the final position; on mate that
    /// side has lost. Returns `None` for non-terminal states.
    pub fn from_engine_state(state: GameState, side_to_move: Side) -> Option<Self> {
        match state {
            GameState::Ongoing | GameState::Check => None,
            GameState::Mate => Some(GameOverReason::Checkmate {
                winner: side_to_move.opposite(),
            }),
            GameState::Stalemate => Some(GameOverReason::Stalemate),
            GameState::DrawRepetition => Some(GameOverReason::DrawRepetition),
            GameState::DrawFifty => Some(GameOverReason::DrawFiftyMove),
            GameState::DrawInsufficient => Some(GameOverReason::DrawInsufficientMaterial),
        }
    }

    /// Short tag for logs and event consumers
    pub fn tag(&self) -> &'static str {
        match self {
            GameOverReason::Checkmate { .. } => "mate",
            GameOverReason::Stalemate => "stalemate",
            GameOverReason::DrawRepetition => "draw_repetition",
            GameOverReason::DrawFiftyMove => "draw_fifty",
            GameOverReason::DrawInsufficientMaterial => "draw_insufficient",
            GameOverReason::Resignation { .. } => "resign",
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOverReason::Checkmate { winner } => Some(*winner),
            GameOverReason::Resignation { loser } => Some(loser.opposite()),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }

    /// Score line: `1-0`, `0-1` or `½-½`
    pub fn result(&self) -> &'static str {
        match self.winner() {
            Some(Side::White) => "1-0",
            Some(Side::Black) => "0-1",
            None => "½-½",
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameOverReason::Checkmate { winner } => format!("{} wins!", winner),
            GameOverReason::Stalemate => "Stalemate!".to_string(),
            GameOverReason::DrawRepetition => "Draw by repetition!".to_string(),
            GameOverReason::DrawFiftyMove => "Draw by 50 move rule!".to_string(),
            GameOverReason::DrawInsufficientMaterial => "Insufficient material!".to_string(),
            GameOverReason::Resignation { loser } => format!("{} resigns!", loser),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameLifecycle {
    #[default]
    Ongoing,
    Terminal(GameOverReason),
}

impl GameLifecycle {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameLifecycle::Terminal(_))
    }

    pub fn reason(&self) -> Option<GameOverReason> {
        match self {
            GameLifecycle::Ongoing => None,
            GameLifecycle::Terminal(reason) => Some(*reason),
        }
    }

    /// Moves to `Terminal(reason)` unless already terminal
    ///
    /// Returns `true` only for the call that actually ended the game.
    pub fn finish(&mut self, reason: GameOverReason) -> bool {
        if self.is_game_over() {
            return false;
        }
        *self = GameLifecycle::Terminal(reason);
        true
    }
}
