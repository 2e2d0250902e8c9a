//! Core module - configuration, errors and logging shared by the game layer
//!
//! - [`GameConfig`] - who plays each side, board orientation, difficulty, clock
//! - [`CoreError`] - config loading and validation failures
//! - [`init_tracing`] - tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use config::{snap_timer_minutes, GameConfig, TIMER_OPTIONS};
pub use error::{CoreError, CoreResult};
pub use logging::init_tracing;
