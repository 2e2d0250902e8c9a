//! Outward-facing collaborators driven by the orchestrator
//!
//! The core never draws, counts down clocks or shows dialogs itself. Each of
//! those concerns sits behind one small trait, and the orchestrator owns one
//! boxed implementation of each through [`Collaborators`].
//!
//! All squares handed to the renderer are in display coordinates.

use crate::game::coordinates::BoardOrientation;
use crate::game::error::GameError;
use crate::game::resources::player::PromotionChoice;
use crate::game::types::{BoardState, PromotionPiece, Side, Square};
use tracing::{debug, error};

/// Highlight layers the renderer keeps apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// The currently selected piece
    Selected,
    /// Legal destinations of the selected piece
    LegalTarget,
}

/// Draws the board
pub trait BoardRenderer {
    /// Redraws every square from `board`, laid out for `orientation`
    fn render_board(&mut self, board: &BoardState, orientation: BoardOrientation);
    fn highlight_squares(&mut self, squares: &[Square], kind: HighlightKind);
    fn clear_highlights(&mut self, kind: HighlightKind);
}

/// Chess clock
pub trait TurnTimer {
    /// Called on every turn change with the side that now has to move
    fn switch_active_side(&mut self, side: Side);

    /// Stops both clocks once the game is over
    fn pause(&mut self) {}
}

/// Scoresheet view
pub trait MoveLogSink {
    fn log_move(&mut self, notation: &str, was_white_move: bool, move_number: u32);
}

/// Modal promotion dialog
pub trait PromotionPrompt {
    fn choose_promotion(&mut self, side: Side) -> PromotionChoice;
}

/// The single user-visible error channel
pub trait ErrorReporter {
    fn report(&mut self, error: &GameError);
}

/// Everything the orchestrator drives besides the engine
pub struct Collaborators {
    pub renderer: Box<dyn BoardRenderer>,
    pub timer: Box<dyn TurnTimer>,
    pub move_log: Box<dyn MoveLogSink>,
    pub promotion: Box<dyn PromotionPrompt>,
    pub errors: Box<dyn ErrorReporter>,
}

impl Collaborators {
    /// Collaborators for running without a UI
    ///
    /// Nothing is drawn, promotions always pick a queen and errors go to the
    /// log.
    pub fn headless() -> Self {
        Self {
            renderer: Box::new(Headless),
            timer: Box::new(Headless),
            move_log: Box::new(Headless),
            promotion: Box::new(Headless),
            errors: Box::new(Headless),
        }
    }
}

/// No-op implementation of every collaborator
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl BoardRenderer for Headless {
    fn render_board(&mut self, _board: &BoardState, _orientation: BoardOrientation) {}
    fn highlight_squares(&mut self, _squares: &[Square], _kind: HighlightKind) {}
    fn clear_highlights(&mut self, _kind: HighlightKind) {}
}

impl TurnTimer for Headless {
    fn switch_active_side(&mut self, _side: Side) {}
}

impl MoveLogSink for Headless {
    fn log_move(&mut self, notation: &str, was_white_move: bool, move_number: u32) {
        debug!(
            "[GAME] {}{} {}",
            move_number,
            if was_white_move { "." } else { "..." },
            notation
        );
    }
}

impl PromotionPrompt for Headless {
    fn choose_promotion(&mut self, _side: Side) -> PromotionChoice {
        PromotionChoice::Piece(PromotionPiece::Queen)
    }
}

impl ErrorReporter for Headless {
    fn report(&mut self, err: &GameError) {
        error!("[GAME] {}", err);
    }
}
