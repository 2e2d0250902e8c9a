//! Chess game logic module - board interaction and game orchestration
//!
//! The chess rules live in an external engine reached through
//! [`EngineBackend`]. This module turns clicks into validated moves, applies
//! them through the engine, and runs the turn flow between human and AI
//! players.
//!
//! # Module Organization
//!
//! - `types` - Sides, squares, pieces, board state
//! - `coordinates` - Logical <-> display square mapping under board flip
//! - `bitboard` - Engine square indexing and move masks
//! - `resources` - Engine client, selection, processing guard, lifecycle, move log
//! - `ai` - Difficulty and AI search tracking
//! - `collaborators` - Renderer, clock, move log, promotion prompt, error reporter
//! - `events` - Event channel for presentation layers
//! - `orchestrator` - [`GameOrchestrator`], the single owner of game state
//!
//! # Data Flow
//!
//! ```text
//! pointer -> display square -> logical square -> Selection
//!         -> GameOrchestrator::apply_human_move -> EngineClient -> GameStatus
//!         -> move log / clock / game end -> AI search (if due) -> ...
//! ```

pub mod ai;
pub mod bitboard;
pub mod collaborators;
pub mod coordinates;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod resources;
pub mod types;

pub use collaborators::{Collaborators, HighlightKind};
pub use coordinates::BoardOrientation;
pub use error::{GameError, GameResult};
pub use events::{EventBus, GameEvent};
pub use orchestrator::{GameOrchestrator, MoveOutcome};
pub use resources::engine::EngineBackend;
