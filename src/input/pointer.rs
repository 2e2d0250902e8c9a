//! Pointer position to board square
//!
//! The presentation layer reports clicks as pixel positions relative to the
//! board's top-left corner. [`BoardGeometry::display_square_at`] turns such a
//! position into a display square: row 0 is the top row on screen, column 0
//! the left column. Flipping into logical coordinates happens later, in the
//! orchestrator.
//!
//! # Edge Handling
//!
//! - Points left of or above the board, or beyond its far edges, hit nothing
//! - A point exactly on the right or bottom edge belongs to the last square
//! - A board with zero or negative size hits nothing

use crate::game::types::Square;
use tracing::trace;

/// On-screen size of the board in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    pub width: f32,
    pub height: f32,
}

impl BoardGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square side lengths, or `None` for a degenerate board
    fn cell_size(&self) -> Option<(f32, f32)> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(self.width) && valid(self.height)).then(|| (self.width / 8.0, self.height / 8.0))
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.cell_size().is_some()
            && (0.0..=self.width).contains(&x)
            && (0.0..=self.height).contains(&y)
    }

    /// Display square under the pointer at `(x, y)`
    pub fn display_square_at(&self, x: f32, y: f32) -> Option<Square> {
        let (cell_w, cell_h) = self.cell_size()?;
        if !self.contains(x, y) {
            trace!("[INPUT] Pointer ({:.1}, {:.1}) is off the board", x, y);
            return None;
        }
        let col = ((x / cell_w).floor() as u8).min(7);
        let row = ((y / cell_h).floor() as u8).min(7);
        Square::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        //! Top-left pixel is row 0 col 0, the far corner clamps to row 7 col 7
        let geometry = BoardGeometry::new(800.0, 800.0);
        assert_eq!(geometry.display_square_at(0.0, 0.0), Square::new(0, 0));
        assert_eq!(geometry.display_square_at(800.0, 800.0), Square::new(7, 7));
        assert_eq!(geometry.display_square_at(799.9, 0.5), Square::new(0, 7));
    }

    #[test]
    fn test_rectangular_board() {
        let geometry = BoardGeometry::new(400.0, 800.0);
        // Column width 50, row height 100
        assert_eq!(geometry.display_square_at(125.0, 650.0), Square::new(6, 2));
    }

    #[test]
    fn test_outside_points() {
        let geometry = BoardGeometry::new(800.0, 800.0);
        assert_eq!(geometry.display_square_at(-1.0, 10.0), None);
        assert_eq!(geometry.display_square_at(10.0, 800.5), None);
        assert_eq!(geometry.display_square_at(f32::NAN, 10.0), None);
    }

    #[test]
    fn test_degenerate_geometry() {
        assert_eq!(BoardGeometry::new(0.0, 800.0).display_square_at(0.0, 0.0), None);
        assert_eq!(BoardGeometry::new(-8.0, -8.0).display_square_at(0.0, 0.0), None);
    }
}
