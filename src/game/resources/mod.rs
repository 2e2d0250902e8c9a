//! Game state owned by the orchestrator
//!
//! # Resource Categories
//!
//! ## Engine
//! - [`EngineClient`] - Owns the engine board, parses its status payload
//! - [`GameStatus`] - Latest parsed status (FEN, last move, state tag)
//!
//! ## Player Interaction
//! - [`Selection`] - Two-click selection state machine
//! - [`PlayerKind`] / [`Players`] - Human or AI control per side
//! - [`PromotionChoice`] - Result of the promotion prompt
//!
//! ## Turn Flow
//! - [`ProcessingGuard`] - Serialises move-applying operations
//!
//! ## Game History
//! - [`MoveLog`] - Scoresheet of applied moves
//!
//! ## Game Status
//! - [`GameLifecycle`] / [`GameOverReason`] - Ongoing or terminal, and why

pub mod engine;
pub mod game_over;
pub mod history;
pub mod player;
pub mod selection;
pub mod turn;

pub use engine::*;
pub use game_over::*;
pub use history::*;
pub use player::*;
pub use selection::*;
pub use turn::*;
