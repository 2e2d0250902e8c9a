//! Core board types shared by every part of the game module
//!
//! All squares handled here are in **logical** coordinates: the engine's fixed
//! frame where rank 0 is the engine's 8th rank (Black's back row) and file 0 is
//! the a-file. Display coordinates only exist at the input/render boundary, see
//! [`crate::game::coordinates`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn is_white(self) -> bool {
        self == Side::White
    }

    /// Logical rank a pawn of this side promotes on
    pub fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// A board square as a (rank, file) pair, both in `0..8`
///
/// `Square::new(0, 0)` is a8 and `Square::new(7, 7)` is h1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub rank: u8,
    pub file: u8,
}

impl Square {
    /// Creates a square, returning `None` when either axis is outside `0..8`
    pub fn new(rank: u8, file: u8) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square { rank, file })
        } else {
            None
        }
    }

    /// Iterates all 64 squares in rank-major order (a8, b8, ..., h1)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { rank, file }))
    }

    /// Algebraic name such as `e4`
    pub fn algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file) as char, 8 - self.rank)
    }

    /// Parses an algebraic name such as `e4`
    pub fn from_algebraic(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].checked_sub(b'a')?;
        let rank_digit = bytes[1].checked_sub(b'1')?;
        if rank_digit > 7 {
            return None;
        }
        Square::new(7 - rank_digit, file)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.algebraic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece on the board, encoded by the engine as a single FEN letter
/// (uppercase = White, lowercase = Black)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Piece { kind, side })
    }

    pub fn fen_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// The piece code used by renderers: `"P"`, `"n"`, ...
    pub fn code(self) -> &'static str {
        match self.fen_char() {
            'P' => "P",
            'N' => "N",
            'B' => "B",
            'R' => "R",
            'Q' => "Q",
            'K' => "K",
            'p' => "p",
            'n' => "n",
            'b' => "b",
            'r' => "r",
            'q' => "q",
            _ => "k",
        }
    }
}

/// Error from [`BoardState::from_placement`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {width} squares instead of 8")]
    RankWidth { rank: usize, width: usize },

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
}

/// The 8x8 grid of pieces, indexed `[rank][file]` in logical coordinates
///
/// Replaced wholesale from each engine status; never patched cell by cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    cells: [[Option<Piece>; 8]; 8],
}

impl BoardState {
    pub const STARTING_PLACEMENT: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn starting_position() -> Self {
        // The constant is well-formed
        Self::from_placement(Self::STARTING_PLACEMENT).unwrap_or_default()
    }

    /// Parses the piece placement field of a FEN string
    pub fn from_placement(placement: &str) -> Result<Self, PlacementError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(PlacementError::RankCount(rows.len()));
        }

        let mut board = BoardState::empty();
        for (rank, row) in rows.iter().enumerate() {
            let mut file = 0usize;
            for c in row.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as usize;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(PlacementError::UnknownPiece(c))?;
                    if file < 8 {
                        board.cells[rank][file] = Some(piece);
                    }
                    file += 1;
                }
            }
            if file != 8 {
                return Err(PlacementError::RankWidth { rank, width: file });
            }
        }
        Ok(board)
    }

    /// Serializes back into a FEN placement field
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for (rank, row) in self.cells.iter().enumerate() {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.rank as usize][square.file as usize]
    }

    /// Piece code at `square`, `""` when empty
    pub fn code(&self, square: Square) -> &'static str {
        self.piece_at(square).map(Piece::code).unwrap_or("")
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }
}

/// Pieces a pawn may promote to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    /// Character passed to the engine's move call
    pub fn as_char(self) -> char {
        match self {
            PromotionPiece::Queen => 'q',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Knight => 'n',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PromotionPiece::Queen),
            'r' => Some(PromotionPiece::Rook),
            'b' => Some(PromotionPiece::Bishop),
            'n' => Some(PromotionPiece::Knight),
            _ => None,
        }
    }
}

/// Character the engine expects when a move carries no promotion
pub const NO_PROMOTION: char = '-';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_corners() {
        //! Checks the logical frame: (0,0) is a8 and (7,7) is h1
        assert_eq!(Square::new(0, 0).unwrap().algebraic(), "a8");
        assert_eq!(Square::new(7, 7).unwrap().algebraic(), "h1");
        assert_eq!(Square::new(6, 4).unwrap().algebraic(), "e2");
        assert!(Square::new(8, 0).is_none());
    }

    #[test]
    fn test_algebraic_parse() {
        assert_eq!(Square::from_algebraic("e4"), Square::new(4, 4));
        assert_eq!(Square::from_algebraic("a1"), Square::new(7, 0));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("e9"), None);
        assert_eq!(Square::from_algebraic("e"), None);
    }

    #[test]
    fn test_starting_position_layout() {
        //! Verifies placement parsing puts Black on logical rank 0
        let board = BoardState::starting_position();
        assert_eq!(board.code(Square::new(0, 4).unwrap()), "k");
        assert_eq!(board.code(Square::new(7, 4).unwrap()), "K");
        assert_eq!(board.code(Square::new(6, 0).unwrap()), "P");
        assert_eq!(board.code(Square::new(4, 4).unwrap()), "");
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.to_placement(), BoardState::STARTING_PLACEMENT);
    }

    #[test]
    fn test_placement_errors() {
        assert_eq!(
            BoardState::from_placement("8/8/8"),
            Err(PlacementError::RankCount(3))
        );
        assert_eq!(
            BoardState::from_placement("7/8/8/8/8/8/8/8"),
            Err(PlacementError::RankWidth { rank: 0, width: 7 })
        );
        assert_eq!(
            BoardState::from_placement("8/8/8/8/8/8/8/7x"),
            Err(PlacementError::UnknownPiece('x'))
        );
    }

    #[test]
    fn test_promotion_chars() {
        for piece in PromotionPiece::ALL {
            assert_eq!(PromotionPiece::from_char(piece.as_char()), Some(piece));
        }
        assert_eq!(PromotionPiece::from_char(NO_PROMOTION), None);
    }
}
