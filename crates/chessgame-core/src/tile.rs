//! Board tile coordinates.

use std::fmt;

/// A tile on the 8x8 board.
///
/// `x` is the file (column) and `y` the rank (row), both in 0-7.
/// Rank 0 is Black's home row and rank 7 is White's.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    x: u8,
    y: u8,
}

impl Tile {
    /// Creates a tile from signed coordinates, or `None` if either lies
    /// outside the board.
    #[inline]
    pub const fn new(x: i8, y: i8) -> Option<Self> {
        if x >= 0 && x < 8 && y >= 0 && y < 8 {
            Some(Tile {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Creates a tile from unsigned coordinates without bounds checking.
    ///
    /// # Panics
    /// Debug builds assert both coordinates are in 0-7.
    #[inline]
    pub const fn at(x: u8, y: u8) -> Self {
        debug_assert!(x < 8 && y < 8);
        Tile { x, y }
    }

    /// Returns the tile displaced by `(dx, dy)`, or `None` if the result
    /// leaves the board.
    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Tile::new(self.x as i8 + dx, self.y as i8 + dy)
    }

    /// Returns the file (0-7).
    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the rank (0-7).
    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns the index (0-63) into a row-major grid.
    #[inline]
    pub const fn index(self) -> usize {
        self.y as usize * 8 + self.x as usize
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_new_in_bounds() {
        let t = Tile::new(4, 6).unwrap();
        assert_eq!(t.x(), 4);
        assert_eq!(t.y(), 6);
        assert_eq!(t.index(), 52);
    }

    #[test]
    fn tile_new_out_of_bounds() {
        assert_eq!(Tile::new(-1, 0), None);
        assert_eq!(Tile::new(0, -1), None);
        assert_eq!(Tile::new(8, 0), None);
        assert_eq!(Tile::new(0, 8), None);
    }

    #[test]
    fn tile_offset() {
        let t = Tile::at(4, 6);
        assert_eq!(t.offset(0, -2), Some(Tile::at(4, 4)));
        assert_eq!(t.offset(3, 1), Some(Tile::at(7, 7)));
        assert_eq!(t.offset(4, 0), None);
        assert_eq!(t.offset(0, 2), None);
    }

    #[test]
    fn tile_index_corners() {
        assert_eq!(Tile::at(0, 0).index(), 0);
        assert_eq!(Tile::at(7, 0).index(), 7);
        assert_eq!(Tile::at(0, 7).index(), 56);
        assert_eq!(Tile::at(7, 7).index(), 63);
    }

    #[test]
    fn tile_debug_display() {
        let t = Tile::at(2, 5);
        assert_eq!(format!("{:?}", t), "Tile(2, 5)");
        assert_eq!(format!("{}", t), "(2, 5)");
    }
}
