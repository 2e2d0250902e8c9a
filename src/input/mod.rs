//! Input module - raw pointer handling
//!
//! Converts pixel positions reported by the presentation layer into display
//! squares. Everything after that (flip, selection, move requests) belongs to
//! the game module.

pub mod pointer;

pub use pointer::BoardGeometry;
