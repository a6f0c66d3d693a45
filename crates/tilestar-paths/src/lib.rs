//! Grid pathfinding: an indexable binary heap and an A* search built on it.
//!
//! - [`PriorityHeap`]: array-backed min-heap with a position index, so
//!   queued items can have their priority lowered in O(log n)
//!   ([`PriorityHeap::decrease_key`]).
//! - [`GridSearch`]: A* over an 8-connected grid with fixed-point octile
//!   costs, steppable one expansion at a time, with optional debug hooks per
//!   expansion ([`GridSearch::run_with`]) or per relaxation
//!   ([`GridSearch::run_traced`]).
//! - [`Terrain`]: the static map, parsed from the `ROWSxCOLS` text format.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step cost |
//! | [`AstarPather`] : [`WeightedPather`] | heuristic |
//!
//! [`OctileGrid`] implements all three for a [`Terrain`].
//!
//! ```
//! use tilestar_paths::{Outcome, SearchConfig, Terrain, find_path};
//!
//! let terrain = Terrain::parse("1x5\n\nS___E\n").unwrap();
//! let Outcome::Found(path) = find_path(&terrain, &SearchConfig::default()).unwrap() else {
//!     panic!("no path");
//! };
//! assert_eq!(path.len(), 5);
//! assert_eq!(path.cost, 40);
//! ```

pub mod config;
mod distance;
mod error;
pub mod heap;
mod search;
mod terrain;
mod traits;

pub use config::{DEFAULT_SCALE, SearchConfig, Termination};
pub use distance::{Octile, diagonal_for};
pub use error::ConfigError;
pub use heap::{EmptyHeapError, PriorityHeap};
pub use search::{
    CellState, Event, Expansion, GridSearch, Outcome, Path, Priority, Relaxation, SearchState,
    find_path,
};
pub use terrain::{OctileGrid, Terrain, Tile};
pub use traits::{AstarPather, Pather, WeightedPather};
pub use tilestar_core::{Coord, Dims};
