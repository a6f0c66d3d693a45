use tilestar_core::Coord;

/// Fixed-point octile metric for 8-directional movement.
///
/// An orthogonal step costs `straight`, a diagonal step costs `diagonal`
/// (√2 × `straight`, rounded down). All arithmetic is integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Octile {
    pub straight: i32,
    pub diagonal: i32,
}

impl Octile {
    /// Metric from explicit step costs.
    #[inline]
    pub const fn new(straight: i32, diagonal: i32) -> Self {
        Self { straight, diagonal }
    }

    /// Metric whose orthogonal step costs `scale`.
    pub fn with_scale(scale: i32) -> Self {
        Self::new(scale, diagonal_for(scale))
    }

    /// Octile distance between `a` and `b`.
    #[inline]
    pub fn distance(&self, a: Coord, b: Coord) -> i32 {
        let dr = (a.row - b.row).abs();
        let dc = (a.col - b.col).abs();
        dr.min(dc) * self.diagonal + (dr - dc).abs() * self.straight
    }
}

impl Default for Octile {
    fn default() -> Self {
        Self::with_scale(crate::config::DEFAULT_SCALE)
    }
}

/// √2 × `scale`, truncated toward zero.
#[inline]
pub fn diagonal_for(scale: i32) -> i32 {
    (f64::from(scale) * std::f64::consts::SQRT_2) as i32
}
