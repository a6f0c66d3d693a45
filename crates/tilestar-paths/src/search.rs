//! A* search over a grid, driven one expansion at a time.
//!
//! A [`GridSearch`] owns everything that changes during a search: the open
//! set ([`PriorityHeap`]) and a side table of per-cell state indexed by flat
//! cell index. The topology it searches is only read through an
//! [`AstarPather`], so the terrain behind it can be shared between searches.

use log::{debug, trace};
use tilestar_core::{Coord, Dims};

use crate::config::{SearchConfig, Termination};
use crate::error::ConfigError;
use crate::heap::PriorityHeap;
use crate::terrain::{OctileGrid, Terrain};
use crate::traits::AstarPather;

/// Open-set priority: total estimate `f`, ties broken by remaining estimate `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    pub f: i32,
    pub h: i32,
}

impl Priority {
    /// Lower `f` first; on equal `f`, the cell nearer the goal first.
    pub fn less(a: &Self, b: &Self) -> bool {
        if a.f != b.f { a.f < b.f } else { a.h < b.h }
    }
}

type PriorityLess = fn(&Priority, &Priority) -> bool;
type OpenSet = PriorityHeap<usize, Priority, PriorityLess>;

/// Per-search state of one cell.
///
/// Costs are only meaningful once `visited` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    /// Cost of the best known path from the start.
    pub g: i32,
    /// Heuristic estimate of the remaining cost.
    pub h: i32,
    /// `g + h`.
    pub f: i32,
    /// Discovered and queued at least once.
    pub visited: bool,
    /// Expanded; never relaxed again.
    pub closed: bool,
    /// Flat index of the cell this one is reached from on the best known path.
    pub parent: Option<usize>,
}

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Start cell queued, nothing expanded yet.
    Initialized,
    Running,
    /// The goal was reached; a path is available.
    Found,
    /// The open set ran dry before reaching the goal.
    Exhausted,
}

impl SearchState {
    /// Whether no further steps will change anything.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// A path from start to goal, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub cells: Vec<Coord>,
    /// Total cost, equal to the goal's final `g`.
    pub cost: i32,
}

impl Path {
    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (cells minus one).
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }
}

/// Result of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Path),
    /// No path exists between start and goal.
    Unreachable,
}

impl Outcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::Unreachable => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// View handed to the debug hook of [`GridSearch::run_with`] after every
/// expansion.
pub struct Expansion<'s, P> {
    /// The cell just expanded.
    pub current: Coord,
    pub search: &'s GridSearch<P>,
}

impl<P> Expansion<'_, P> {
    /// Cells expanded so far.
    pub fn closed(&self) -> impl Iterator<Item = Coord> + '_ {
        self.search.closed_cells()
    }

    /// Cells waiting in the open set.
    pub fn open(&self) -> impl Iterator<Item = Coord> + '_ {
        self.search.open_cells()
    }
}

/// View handed to the hook of [`GridSearch::run_traced`] each time a cell
/// gets a better path.
pub struct Relaxation<'s, P> {
    /// The cell being expanded.
    pub from: Coord,
    /// The neighbor whose cost, parent and open-set entry were just updated.
    pub to: Coord,
    pub search: &'s GridSearch<P>,
}

/// Progress reported by [`GridSearch::run_traced`].
pub enum Event<'s, P> {
    Expanded(Expansion<'s, P>),
    Relaxed(Relaxation<'s, P>),
}

impl<'s, P> Event<'s, P> {
    pub fn search(&self) -> &'s GridSearch<P> {
        match self {
            Self::Expanded(e) => e.search,
            Self::Relaxed(r) => r.search,
        }
    }
}

/// An A* search in progress.
///
/// Construction relaxes the start cell to `g = 0` and queues it. Each
/// [`step`](Self::step) pops the cheapest open cell, closes it and relaxes
/// its neighbors; cells seen for the first time are pushed, cells whose
/// cost improved get a [`decrease_key`](PriorityHeap::decrease_key).
pub struct GridSearch<P> {
    pather: P,
    dims: Dims,
    start: usize,
    goal: usize,
    termination: Termination,
    cells: Vec<CellState>,
    open: OpenSet,
    state: SearchState,
    expansions: usize,
    last_expanded: Option<usize>,
    nbuf: Vec<Coord>,
}

impl<'t> GridSearch<OctileGrid<'t>> {
    /// Prepare a search from the terrain's start to its end, with octile step
    /// costs taken from `config`.
    pub fn new(terrain: &'t Terrain, config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate_for(terrain.dims())?;
        Self::with_pather(
            OctileGrid::new(terrain, config.metric()),
            terrain.dims(),
            terrain.start(),
            terrain.end(),
            config,
        )
    }
}

impl<P> GridSearch<P> {
    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn start(&self) -> Coord {
        self.dims.coord(self.start)
    }

    pub fn goal(&self) -> Coord {
        self.dims.coord(self.goal)
    }

    pub fn pather(&self) -> &P {
        &self.pather
    }

    /// Search state of `c`, or `None` outside the grid.
    pub fn cell(&self, c: Coord) -> Option<&CellState> {
        self.dims.idx(c).map(|i| &self.cells[i])
    }

    /// Slot of `c` in the open set's backing array, if it is queued.
    pub fn heap_position(&self, c: Coord) -> Option<usize> {
        self.dims.idx(c).and_then(|i| self.open.position(i))
    }

    /// Cells expanded so far, in row-major order.
    pub fn closed_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| s.closed)
            .map(|(i, _)| self.dims.coord(i))
    }

    /// Cells currently in the open set, in heap order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.open.iter().map(|(i, _)| self.dims.coord(i))
    }

    /// The path found, once the search is in [`SearchState::Found`].
    pub fn path(&self) -> Option<Path> {
        (self.state == SearchState::Found).then(|| self.trace_back(self.goal))
    }

    fn trace_back(&self, goal: usize) -> Path {
        let mut cells = Vec::new();
        let mut cur = Some(goal);
        while let Some(i) = cur {
            cells.push(self.dims.coord(i));
            cur = self.cells[i].parent;
        }
        cells.reverse();
        Path {
            cells,
            cost: self.cells[goal].g,
        }
    }
}

impl<P: AstarPather> GridSearch<P> {
    /// Prepare a search over an arbitrary pather on a `dims` grid.
    ///
    /// Only `termination` and `heap_capacity` are read from `config`; step
    /// costs come from the pather.
    pub fn with_pather(
        pather: P,
        dims: Dims,
        start: Coord,
        goal: Coord,
        config: &SearchConfig,
    ) -> Result<Self, ConfigError> {
        let start_idx = dims
            .idx(start)
            .ok_or(ConfigError::OutOfBounds { at: start, dims })?;
        let goal_idx = dims
            .idx(goal)
            .ok_or(ConfigError::OutOfBounds { at: goal, dims })?;

        let mut open: OpenSet =
            PriorityHeap::with_capacity(config.heap_capacity, Priority::less as PriorityLess);
        let mut cells = vec![CellState::default(); dims.len()];

        let h = pather.estimate(start, goal);
        cells[start_idx] = CellState {
            g: 0,
            h,
            f: h,
            visited: true,
            closed: false,
            parent: None,
        };
        open.push(start_idx, Priority { f: h, h });
        debug!("search {dims} grid from {start} to {goal}, {:?}", config.termination);

        Ok(Self {
            pather,
            dims,
            start: start_idx,
            goal: goal_idx,
            termination: config.termination,
            cells,
            open,
            state: SearchState::Initialized,
            expansions: 0,
            last_expanded: None,
            nbuf: Vec::with_capacity(8),
        })
    }

    /// Advance by one expansion and return the resulting state.
    ///
    /// Once the search is finished further calls do nothing.
    pub fn step(&mut self) -> SearchState {
        self.step_traced(&mut |_| {})
    }

    fn step_traced(&mut self, hook: &mut impl FnMut(&Event<'_, P>)) -> SearchState {
        self.last_expanded = None;
        if self.state.is_finished() {
            return self.state;
        }
        self.state = SearchState::Running;

        let Some((ci, _)) = self.open.pop_min() else {
            debug!("open set exhausted after {} expansions", self.expansions);
            self.state = SearchState::Exhausted;
            return self.state;
        };

        // A start that is also the goal is never touched as a neighbor.
        if ci == self.goal && (self.termination == Termination::GoalPopped || ci == self.start) {
            self.cells[ci].closed = true;
            self.finish();
            return self.state;
        }

        self.cells[ci].closed = true;
        self.expansions += 1;
        self.last_expanded = Some(ci);

        let current = self.dims.coord(ci);
        let current_g = self.cells[ci].g;
        trace!("expand {current} g={current_g} f={}", self.cells[ci].f);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(current, &mut nbuf);

        for &np in &nbuf {
            let Some(ni) = self.dims.idx(np) else {
                continue;
            };
            if self.cells[ni].closed {
                continue;
            }
            let tentative_g = current_g + self.pather.cost(current, np);
            if !self.relax(ni, ci, tentative_g) {
                continue;
            }
            hook(&Event::Relaxed(Relaxation {
                from: current,
                to: np,
                search: self,
            }));
            if ni == self.goal && self.termination == Termination::FirstTouch {
                self.finish();
                break;
            }
        }

        self.nbuf = nbuf;
        self.state
    }

    /// Offer `g` as the cost of reaching `ni` through `ci`. Returns whether
    /// the cell's best path changed.
    fn relax(&mut self, ni: usize, ci: usize, g: i32) -> bool {
        let cell = self.cells[ni];
        if !cell.visited {
            let h = self
                .pather
                .estimate(self.dims.coord(ni), self.dims.coord(self.goal));
            self.cells[ni] = CellState {
                g,
                h,
                f: g + h,
                visited: true,
                closed: false,
                parent: Some(ci),
            };
            self.open.push(ni, Priority { f: g + h, h });
        } else if g < cell.g {
            let updated = &mut self.cells[ni];
            updated.g = g;
            updated.f = g + updated.h;
            updated.parent = Some(ci);
            let priority = Priority {
                f: updated.f,
                h: updated.h,
            };
            self.open.decrease_key(ni, priority);
        } else {
            return false;
        }
        debug!(
            "new path defined: {} -> {} (g={g})",
            self.dims.coord(ci),
            self.dims.coord(ni)
        );
        true
    }

    fn finish(&mut self) {
        self.state = SearchState::Found;
        debug!(
            "reached {} with cost {} after {} expansions",
            self.dims.coord(self.goal),
            self.cells[self.goal].g,
            self.expansions
        );
    }

    /// Run to completion.
    pub fn run(&mut self) -> Outcome {
        self.run_with(|_| {})
    }

    /// Run to completion, calling `hook` once after every expansion.
    pub fn run_with(&mut self, mut hook: impl FnMut(&Expansion<'_, P>)) -> Outcome {
        self.run_traced(|event| {
            if let Event::Expanded(e) = event {
                hook(e);
            }
        })
    }

    /// Run to completion, calling `hook` after every improved neighbor and
    /// again once the expansion that relaxed them is done.
    pub fn run_traced(&mut self, mut hook: impl FnMut(&Event<'_, P>)) -> Outcome {
        loop {
            let state = self.step_traced(&mut hook);
            if let Some(ci) = self.last_expanded {
                hook(&Event::Expanded(Expansion {
                    current: self.dims.coord(ci),
                    search: self,
                }));
            }
            match state {
                SearchState::Found => return Outcome::Found(self.trace_back(self.goal)),
                SearchState::Exhausted => return Outcome::Unreachable,
                SearchState::Initialized | SearchState::Running => {}
            }
        }
    }
}

/// Search `terrain` from its start to its end.
pub fn find_path(terrain: &Terrain, config: &SearchConfig) -> Result<Outcome, ConfigError> {
    Ok(GridSearch::new(terrain, config)?.run())
}
