//! # MoveMask - legal-destination bitboards from the engine
//!
//! The engine answers "where can this piece go?" with a single `u64`. Bit `i`
//! is set when the square with engine index `i` is a legal destination.
//!
//! ## Engine indexing
//!
//! The engine counts squares little-endian, rank-major, starting from a1:
//!
//! ```text
//! index = file + 8 * (7 - rank)
//! ```
//!
//! Logical rank 7 (a1..h1) therefore occupies indices 0-7 and logical rank 0
//! (a8..h8) occupies 56-63: a1 is 0, h8 is 63, e2 is 12.
//!
//! Masks are fetched fresh for every selection. Checks and pins change between
//! moves, so a cached mask is a legality bug.

use crate::game::types::Square;
use std::fmt;

/// Engine square index for a logical square
#[inline]
pub fn square_index(square: Square) -> u8 {
    square.file + 8 * (7 - square.rank)
}

/// Inverse of [`square_index`]; `index` must be in `0..64`
#[inline]
pub fn square_from_index(index: u8) -> Square {
    Square {
        rank: 7 - (index / 8),
        file: index % 8,
    }
}

/// A set of logical squares backed by the engine's 64-bit layout
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct MoveMask(pub u64);

impl MoveMask {
    pub const EMPTY: MoveMask = MoveMask(0);

    pub fn new(bits: u64) -> Self {
        MoveMask(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn contains(self, square: Square) -> bool {
        self.0 & (1u64 << square_index(square)) != 0
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square_index(square);
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Squares whose bit is set, in ascending engine-index order
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(square_from_index(index))
        })
    }

    pub fn decode(self) -> Vec<Square> {
        self.squares().collect()
    }

    pub fn encode<I: IntoIterator<Item = Square>>(squares: I) -> MoveMask {
        let mut mask = MoveMask::EMPTY;
        for square in squares {
            mask.insert(square);
        }
        mask
    }
}

impl FromIterator<Square> for MoveMask {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        MoveMask::encode(iter)
    }
}

impl fmt::Debug for MoveMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.squares().map(Square::algebraic).collect();
        write!(f, "MoveMask({:#018x} [{}])", self.0, names.join(", "))
    }
}
