//! Geometry primitives: [`Coord`] and [`Dims`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A cell position. Rows grow downward, columns grow to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Top-left corner (0, 0).
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// All eight surrounding coordinates, row by row from the top-left.
    ///
    /// No bounds checking is done; see [`Dims::contains`].
    #[inline]
    pub fn neighbors_8(self) -> [Coord; 8] {
        [
            self.shift(-1, -1),
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
        ]
    }

    /// Whether `other` is one king's move away (8-connected, not equal).
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Size of a rectangular map, `rows` × `cols`, anchored at [`Coord::ORIGIN`].
///
/// Cells are stored row-major in one flat array; [`idx`](Self::idx) and
/// [`coord`](Self::coord) convert between the two addressings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: i32,
    pub cols: i32,
}

impl Dims {
    /// Create new dimensions. Negative values are clamped to zero.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: if rows < 0 { 0 } else { rows },
            cols: if cols < 0 { 0 } else { cols },
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Whether the map holds no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the map.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` when out of bounds.
    #[inline]
    pub fn idx(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Coordinate of flat index `idx`.
    ///
    /// `idx` must be smaller than [`len`](Self::len).
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        debug_assert!(idx < self.len(), "index {idx} outside {self}");
        let cols = self.cols as usize;
        Coord::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Iterate over every coordinate in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Coord> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_all_adjacent() {
        let c = Coord::new(4, 7);
        let ns = c.neighbors_8();
        assert_eq!(ns.len(), 8);
        for n in ns {
            assert!(c.is_adjacent(n), "{n} should neighbour {c}");
        }
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(6, 7)));
    }

    #[test]
    fn coord_arithmetic_and_order() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, -1);
        assert_eq!(a + b, Coord::new(4, 1));
        assert_eq!(b - a, Coord::new(2, -3));
        assert!(Coord::new(0, 9) < Coord::new(1, 0));
        assert_eq!(a.to_string(), "(1, 2)");
    }

    #[test]
    fn idx_round_trips_inside_bounds() {
        let dims = Dims::new(3, 5);
        assert_eq!(dims.len(), 15);
        for (i, c) in dims.iter().enumerate() {
            assert_eq!(dims.idx(c), Some(i));
            assert_eq!(dims.coord(i), c);
        }
    }

    #[test]
    fn out_of_bounds_has_no_index() {
        let dims = Dims::new(2, 2);
        assert_eq!(dims.idx(Coord::new(-1, 0)), None);
        assert_eq!(dims.idx(Coord::new(0, 2)), None);
        assert_eq!(dims.idx(Coord::new(2, 0)), None);
    }

    #[test]
    fn negative_dims_are_empty() {
        let dims = Dims::new(-3, 4);
        assert!(dims.is_empty());
        assert_eq!(dims.len(), 0);
        assert_eq!(dims.iter().count(), 0);
        assert_eq!(Dims::new(3, 4).to_string(), "3x4");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        let c = Coord::new(3, 7);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn dims_round_trip() {
        let d = Dims::new(12, 40);
        let json = serde_json::to_string(&d).unwrap();
        let back: Dims = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }
}
