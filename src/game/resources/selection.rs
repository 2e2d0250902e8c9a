//! Piece selection state machine
//!
//! Turns two clicks into a move request. The machine is a plain value:
//! [`Selection::on_click`] consumes the current state and returns the next one
//! together with the effects the caller should carry out (highlights, move
//! requests). Nothing here touches the engine or the renderer directly; the
//! legal-move lookup is passed in as a closure.
//!
//! ```text
//! Idle --click own piece--> Selected(sq, mask)
//! Selected --click same square--> Idle                     (deselect)
//! Selected --click other own piece--> Selected(new, mask') (reselect)
//! Selected --click target in mask--> Idle + MoveRequested
//! Selected --click anything else--> Idle                   (rejected silently)
//! ```

use crate::game::bitboard::MoveMask;
use crate::game::types::{BoardState, Side, Square};
use tracing::debug;

/// A completed two-click move, in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
}

/// Side effects requested by a selection transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEffect {
    /// Show `square` as selected and `targets` as its legal destinations
    Highlight { square: Square, targets: MoveMask },
    /// Remove selection and destination highlights
    ClearHighlights,
    /// Hand a validated move to the orchestrator
    MoveRequested(MoveRequest),
}

/// Current selection of the player to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        square: Square,
        /// Mask fetched when `square` was selected; never reused across selections
        targets: MoveMask,
    },
}

/// Result of feeding one click to the machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTransition {
    pub next: Selection,
    pub effects: Vec<SelectionEffect>,
}

impl SelectionTransition {
    fn stay(state: Selection) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }

    fn idle(effects: Vec<SelectionEffect>) -> Self {
        Self {
            next: Selection::Idle,
            effects,
        }
    }

    /// The move request emitted by this transition, if any
    pub fn move_request(&self) -> Option<MoveRequest> {
        self.effects.iter().find_map(|e| match e {
            SelectionEffect::MoveRequested(request) => Some(*request),
            _ => None,
        })
    }
}

impl Selection {
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }

    pub fn selected_square(&self) -> Option<Square> {
        match self {
            Selection::Idle => None,
            Selection::Selected { square, .. } => Some(*square),
        }
    }

    /// Applies one click on logical square `clicked`
    ///
    /// `legal_moves` is called whenever a piece gets (re)selected, so every
    /// selection carries a mask fetched for the current position. Its error is
    /// returned untouched; invalid clicks themselves never produce an error.
    pub fn on_click<E>(
        self,
        clicked: Square,
        board: &BoardState,
        side_to_move: Side,
        mut legal_moves: impl FnMut(Square) -> Result<MoveMask, E>,
    ) -> Result<SelectionTransition, E> {
        let owns_clicked = board
            .piece_at(clicked)
            .is_some_and(|piece| piece.side == side_to_move);

        match self {
            Selection::Idle => {
                if !owns_clicked {
                    debug!("[SELECTION] Ignoring click on {} (empty or opponent)", clicked);
                    return Ok(SelectionTransition::stay(Selection::Idle));
                }
                let targets = legal_moves(clicked)?;
                debug!("[SELECTION] Selected {} with {} targets", clicked, targets.count());
                Ok(select(clicked, targets))
            }
            Selection::Selected { square, targets } => {
                if clicked == square {
                    debug!("[SELECTION] Deselected {}", square);
                    return Ok(SelectionTransition::idle(vec![SelectionEffect::ClearHighlights]));
                }

                if owns_clicked {
                    let targets = legal_moves(clicked)?;
                    debug!("[SELECTION] Switched selection {} -> {}", square, clicked);
                    return Ok(select(clicked, targets));
                }

                if targets.contains(clicked) {
                    debug!("[SELECTION] Move requested {} -> {}", square, clicked);
                    Ok(SelectionTransition::idle(vec![
                        SelectionEffect::ClearHighlights,
                        SelectionEffect::MoveRequested(MoveRequest {
                            from: square,
                            to: clicked,
                        }),
                    ]))
                } else {
                    debug!("[SELECTION] {} is not a legal target from {}", clicked, square);
                    Ok(SelectionTransition::idle(vec![SelectionEffect::ClearHighlights]))
                }
            }
        }
    }
}

fn select(square: Square, targets: MoveMask) -> SelectionTransition {
    SelectionTransition {
        next: Selection::Selected { square, targets },
        effects: vec![
            SelectionEffect::ClearHighlights,
            SelectionEffect::Highlight { square, targets },
        ],
    }
}
