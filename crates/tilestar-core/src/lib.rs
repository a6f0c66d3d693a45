//! **tilestar-core**: geometry shared by the tilestar crates.
//!
//! A map is a rectangle of cells addressed by [`Coord`] (row, column). Its
//! size is carried by an explicit [`Dims`] value that every component needing
//! bounds or flat indexing receives, so no grid size is ever global state.

pub mod geom;

pub use geom::{Coord, Dims};
