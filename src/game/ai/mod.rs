//! Chess AI opponent
//!
//! The engine performs the search; this module only decides how deep to
//! search and tracks the search while it runs on a worker thread.
//!
//! # Architecture
//!
//! - `AIDifficulty`: difficulty level, mapped to a fixed search depth
//! - `PendingAIMove`: handle for a search in flight, holding the processing token
//! - `AIStatistics`: totals over the game's searches
//!
//! # Flow
//!
//! 1. The orchestrator acquires the processing guard and spawns the search
//! 2. The handle is polled (or waited on) from the orchestration thread
//! 3. The completed result is applied there: status re-read, move logged,
//!    game end checked
//! 4. Dropping the completed handle releases the guard

pub mod resource;
pub mod systems;

pub use resource::{AIDifficulty, UnknownDifficulty};
pub use systems::{AIStatistics, CompletedAIMove, PendingAIMove};
