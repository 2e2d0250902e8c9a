//! Turn flow control

pub mod pending;

pub use pending::{ProcessingGuard, ProcessingToken};
