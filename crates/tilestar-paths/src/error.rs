use std::fmt;
use std::io;

use tilestar_core::{Coord, Dims};

/// Fatal configuration errors, reported before a search starts.
#[derive(Debug)]
pub enum ConfigError {
    /// The map file could not be read.
    Io(io::Error),
    /// The input has no `ROWSxCOLS` header line.
    MissingHeader,
    /// The header line is not of the form `ROWSxCOLS`.
    BadHeader(String),
    /// The header declares a map with no cells.
    ZeroDimension(Dims),
    /// Number of map lines differs from the header.
    RowCount { expected: i32, found: usize },
    /// A map line is not as wide as the header says.
    RowWidth { row: i32, expected: i32, found: usize },
    /// A character outside `S`, `E`, `Z`, `_`.
    InvalidTile { ch: char, at: Coord },
    /// No `S` cell.
    MissingStart,
    /// No `E` cell.
    MissingEnd,
    /// More than one `S` cell.
    DuplicateStart { first: Coord, second: Coord },
    /// More than one `E` cell.
    DuplicateEnd { first: Coord, second: Coord },
    /// A search endpoint lies outside the map.
    OutOfBounds { at: Coord, dims: Dims },
    /// Step costs must be positive with `straight <= diagonal <= 2 * straight`.
    InvalidScale { straight: i32, diagonal: i32 },
    /// Path costs on a map this size would not fit in an `i32`.
    CostOverflow { diagonal: i32, dims: Dims },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read map: {e}"),
            Self::MissingHeader => f.write_str("map is empty: expected a ROWSxCOLS header"),
            Self::BadHeader(line) => write!(f, "bad map header {line:?}: expected ROWSxCOLS"),
            Self::ZeroDimension(dims) => write!(f, "map dimensions {dims} hold no cells"),
            Self::RowCount { expected, found } => {
                write!(f, "map declares {expected} rows but has {found}")
            }
            Self::RowWidth {
                row,
                expected,
                found,
            } => write!(f, "map row {row} has {found} columns, expected {expected}"),
            Self::InvalidTile { ch, at } => write!(f, "invalid map character {ch:?} at {at}"),
            Self::MissingStart => f.write_str("map has no start cell 'S'"),
            Self::MissingEnd => f.write_str("map has no end cell 'E'"),
            Self::DuplicateStart { first, second } => {
                write!(f, "map has two start cells, at {first} and {second}")
            }
            Self::DuplicateEnd { first, second } => {
                write!(f, "map has two end cells, at {first} and {second}")
            }
            Self::OutOfBounds { at, dims } => write!(f, "{at} lies outside the {dims} map"),
            Self::InvalidScale { straight, diagonal } => write!(
                f,
                "invalid step costs: straight {straight}, diagonal {diagonal}"
            ),
            Self::CostOverflow { diagonal, dims } => write!(
                f,
                "step cost {diagonal} is too large for a {dims} map"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
