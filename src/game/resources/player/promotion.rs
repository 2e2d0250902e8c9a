//! Pawn promotion detection and prompt results
//!
//! Detection only looks at the moving piece and the destination rank. It is
//! applied to moves that already passed the engine's legal-move mask, so a
//! pawn reaching its last rank here is always a real promotion.

use crate::game::types::{BoardState, PieceKind, PromotionPiece, Side, Square};

/// Answer from the promotion prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionChoice {
    Piece(PromotionPiece),
    /// The player closed the prompt; the whole move is abandoned
    Cancelled,
}

impl PromotionChoice {
    /// Maps the prompt's character protocol (`'q'`, `'r'`, `'b'`, `'n'`, anything else cancels)
    pub fn from_char(c: char) -> Self {
        PromotionPiece::from_char(c)
            .map(PromotionChoice::Piece)
            .unwrap_or(PromotionChoice::Cancelled)
    }
}

/// Check if a piece kind moving to `target_rank` promotes
pub fn is_promotion_move(kind: PieceKind, side: Side, target_rank: u8) -> bool {
    kind == PieceKind::Pawn && target_rank == side.promotion_rank()
}

/// Side whose pawn promotes on `from -> to`, or `None` for an ordinary move
pub fn promoting_side(board: &BoardState, from: Square, to: Square) -> Option<Side> {
    let piece = board.piece_at(from)?;
    is_promotion_move(piece.kind, piece.side, to.rank).then_some(piece.side)
}
