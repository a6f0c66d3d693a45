//! Static map terrain and its text format.
//!
//! A map file starts with a `ROWSxCOLS` header, then a blank line, then
//! `ROWS` lines of `COLS` characters:
//!
//! ```text
//! 3x3
//!
//! S__
//! _Z_
//! __E
//! ```
//!
//! `S` is the start, `E` the end, `Z` an obstacle and `_` open floor. Exactly
//! one `S` and one `E` are required.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tilestar_core::{Coord, Dims};

use crate::distance::Octile;
use crate::error::ConfigError;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Terrain kind of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Empty,
    Start,
    End,
    Obstacle,
}

impl Tile {
    /// Parse a map character.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '_' => Some(Self::Empty),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            'Z' => Some(Self::Obstacle),
            _ => None,
        }
    }

    /// The map character for this tile.
    pub fn to_char(self) -> char {
        match self {
            Self::Empty => '_',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Obstacle => 'Z',
        }
    }

    /// Whether a path may cross this tile.
    #[inline]
    pub fn is_passable(self) -> bool {
        self != Self::Obstacle
    }
}

/// Immutable terrain of a map: one flat row-major array of tiles plus the
/// location of the unique start and end cells.
///
/// Terrain is never mutated by a search, so one `Terrain` can be shared by
/// any number of concurrent searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terrain {
    dims: Dims,
    tiles: Vec<Tile>,
    start: Coord,
    end: Coord,
}

impl Terrain {
    /// Parse a complete map, header included.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let mut lines = s.lines();
        let header = lines
            .by_ref()
            .find(|l| !l.trim().is_empty())
            .ok_or(ConfigError::MissingHeader)?;
        let dims = parse_header(header)?;

        let mut body: Vec<&str> = lines.skip_while(|l| l.is_empty()).collect();
        while body.last().is_some_and(|l| l.is_empty()) {
            body.pop();
        }
        Self::from_rows_checked(dims, &body)
    }

    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Build terrain from header-less rows; dimensions are taken from the
    /// first row's width and the row count.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let dims = Dims::new(rows.len() as i32, cols as i32);
        if dims.is_empty() {
            return Err(ConfigError::ZeroDimension(dims));
        }
        Self::from_rows_checked(dims, rows)
    }

    fn from_rows_checked(dims: Dims, rows: &[&str]) -> Result<Self, ConfigError> {
        if rows.len() != dims.rows as usize {
            return Err(ConfigError::RowCount {
                expected: dims.rows,
                found: rows.len(),
            });
        }

        let mut tiles = Vec::with_capacity(dims.len());
        let mut start: Option<Coord> = None;
        let mut end: Option<Coord> = None;

        for (row, line) in rows.iter().enumerate() {
            let row = row as i32;
            let width = line.chars().count();
            if width != dims.cols as usize {
                return Err(ConfigError::RowWidth {
                    row,
                    expected: dims.cols,
                    found: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let at = Coord::new(row, col as i32);
                let tile = Tile::from_char(ch).ok_or(ConfigError::InvalidTile { ch, at })?;
                match tile {
                    Tile::Start => {
                        if let Some(first) = start {
                            return Err(ConfigError::DuplicateStart { first, second: at });
                        }
                        start = Some(at);
                    }
                    Tile::End => {
                        if let Some(first) = end {
                            return Err(ConfigError::DuplicateEnd { first, second: at });
                        }
                        end = Some(at);
                    }
                    Tile::Empty | Tile::Obstacle => {}
                }
                tiles.push(tile);
            }
        }

        let start = start.ok_or(ConfigError::MissingStart)?;
        let end = end.ok_or(ConfigError::MissingEnd)?;
        log::debug!("loaded {dims} map, start {start}, end {end}");
        Ok(Self {
            dims,
            tiles,
            start,
            end,
        })
    }

    /// Map dimensions.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// The end cell.
    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Tile at `c`, or `None` outside the map.
    #[inline]
    pub fn tile(&self, c: Coord) -> Option<Tile> {
        self.dims.idx(c).map(|i| self.tiles[i])
    }

    /// Whether `c` is inside the map and not an obstacle.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.tile(c).is_some_and(Tile::is_passable)
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

fn parse_header(line: &str) -> Result<Dims, ConfigError> {
    let bad = || ConfigError::BadHeader(line.to_string());
    let (rows, cols) = line.trim().split_once(['x', 'X']).ok_or_else(bad)?;
    let rows: i32 = rows.trim().parse().map_err(|_| bad())?;
    let cols: i32 = cols.trim().parse().map_err(|_| bad())?;
    if rows < 0 || cols < 0 {
        return Err(bad());
    }
    let dims = Dims::new(rows, cols);
    if dims.is_empty() {
        return Err(ConfigError::ZeroDimension(dims));
    }
    Ok(dims)
}

impl FromStr for Terrain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Terrain {
    /// Writes the map in its file format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", self.dims)?;
        for row in self.tiles.chunks(self.dims.cols as usize) {
            let line: String = row.iter().map(|t| t.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// OctileGrid
// ---------------------------------------------------------------------------

/// A [`Terrain`] viewed as an 8-connected graph with octile step costs.
///
/// Neighbors are the up-to-eight surrounding cells that lie on the map and
/// are not obstacles. Diagonal moves past obstacle corners are allowed.
#[derive(Debug, Clone, Copy)]
pub struct OctileGrid<'a> {
    terrain: &'a Terrain,
    metric: Octile,
}

impl<'a> OctileGrid<'a> {
    pub fn new(terrain: &'a Terrain, metric: Octile) -> Self {
        Self { terrain, metric }
    }

    pub fn terrain(&self) -> &'a Terrain {
        self.terrain
    }

    pub fn metric(&self) -> Octile {
        self.metric
    }
}

impl Pather for OctileGrid<'_> {
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        buf.extend(
            c.neighbors_8()
                .into_iter()
                .filter(|&n| self.terrain.is_passable(n)),
        );
    }
}

impl WeightedPather for OctileGrid<'_> {
    fn cost(&self, from: Coord, to: Coord) -> i32 {
        self.metric.distance(from, to)
    }
}

impl AstarPather for OctileGrid<'_> {
    fn estimate(&self, from: Coord, to: Coord) -> i32 {
        self.metric.distance(from, to)
    }
}
