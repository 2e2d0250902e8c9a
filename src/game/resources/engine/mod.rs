//! Engine integration: the collaborator trait, the handle-owning client and
//! the status payload decoder.

pub mod backend;
#[allow(clippy::module_inception)]
pub mod engine;
#[cfg(feature = "native-engine")]
pub mod ffi;
pub mod status;

pub use backend::EngineBackend;
pub use engine::{EngineClient, EngineError, EngineResult};
#[cfg(feature = "native-engine")]
pub use ffi::NativeEngine;
pub use status::{Fen, GameState, GameStatus, StatusError};
