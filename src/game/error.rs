//! Error types for game module
//!
//! Errors that reach the orchestration boundary. Interaction mistakes (empty
//! squares, illegal targets) never become errors; they are absorbed by the
//! selection state machine.

use crate::core::CoreError;
use crate::game::resources::engine::EngineError;

/// Errors that can occur in game orchestration
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Engine call or status decoding failed
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The launch configuration was rejected
    #[error(transparent)]
    Config(#[from] CoreError),

    /// The AI search failed; the AI turn did not advance
    #[error("AI move computation failed: {message}")]
    AiComputation { message: String },
}

impl GameError {
    /// True when the error came from a status payload that could not be parsed
    pub fn is_malformed_status(&self) -> bool {
        matches!(self, GameError::Engine(EngineError::MalformedStatus(_)))
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
