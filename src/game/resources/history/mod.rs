//! Move history

#[allow(clippy::module_inception)]
pub mod history;

pub use history::{MoveLog, MoveLogEntry};
