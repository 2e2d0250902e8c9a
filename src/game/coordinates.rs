//! Logical <-> display coordinate mapping
//!
//! The engine always reasons in logical coordinates. When the board is shown
//! with Black at the bottom both axes are mirrored, so every square crossing the
//! input or render boundary goes through [`BoardOrientation`].
//!
//! The mapping `n -> 7 - n` is its own inverse, so `to_display` and
//! `to_logical` share one formula and a round trip is always exact.

use crate::game::types::Square;

/// Whether the board is drawn flipped (Black at the bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardOrientation {
    pub flipped: bool,
}

impl BoardOrientation {
    pub fn new(flipped: bool) -> Self {
        Self { flipped }
    }

    /// Orientation for a board with White at the bottom when `bottom_is_white`
    pub fn from_bottom_side(bottom_is_white: bool) -> Self {
        Self::new(!bottom_is_white)
    }

    pub fn to_display(self, logical: Square) -> Square {
        to_display(logical, self.flipped)
    }

    pub fn to_logical(self, display: Square) -> Square {
        to_logical(display, self.flipped)
    }
}

#[inline]
fn mirror(n: u8, flipped: bool) -> u8 {
    if flipped {
        7 - n
    } else {
        n
    }
}

/// Maps a logical square to where it is drawn
pub fn to_display(logical: Square, flipped: bool) -> Square {
    Square {
        rank: mirror(logical.rank, flipped),
        file: mirror(logical.file, flipped),
    }
}

/// Maps a drawn square back to the engine's frame
pub fn to_logical(display: Square, flipped: bool) -> Square {
    Square {
        rank: mirror(display.rank, flipped),
        file: mirror(display.file, flipped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_squares() {
        //! Every square survives logical -> display -> logical for both flips
        for flipped in [false, true] {
            for sq in Square::all() {
                assert_eq!(to_logical(to_display(sq, flipped), flipped), sq);
                assert_eq!(to_display(to_logical(sq, flipped), flipped), sq);
            }
        }
    }

    #[test]
    fn test_unflipped_is_identity() {
        for sq in Square::all() {
            assert_eq!(to_display(sq, false), sq);
        }
    }

    #[test]
    fn test_flipped_mirrors_both_axes() {
        let a8 = Square::new(0, 0).unwrap();
        let h1 = Square::new(7, 7).unwrap();
        assert_eq!(to_display(a8, true), h1);

        let e2 = Square::new(6, 4).unwrap();
        assert_eq!(to_display(e2, true), Square::new(1, 3).unwrap());
    }

    #[test]
    fn test_orientation_from_bottom_side() {
        assert!(!BoardOrientation::from_bottom_side(true).flipped);
        assert!(BoardOrientation::from_bottom_side(false).flipped);
    }
}
