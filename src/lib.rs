//! Board interaction and game orchestration for XFChess
//!
//! Maps pointer input to board squares, runs the two-click selection state
//! machine, and coordinates human and engine-driven turns against an external
//! chess engine.

pub mod core;
pub mod game;
pub mod input;

pub use crate::core::{init_tracing, GameConfig};
pub use game::{Collaborators, GameEvent, GameOrchestrator, MoveOutcome};
