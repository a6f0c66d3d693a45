use tilestar_core::Coord;

/// Which cells a search may move to from a given cell.
pub trait Pather {
    /// Push every cell reachable in one move from `c`. `buf` arrives empty;
    /// cells off the map may be pushed and are skipped by the search.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);
}

/// Fixed-point price of a single move.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to its neighbor `to`, in the same integer
    /// units as every other cost of the search (e.g. 10 per orthogonal step
    /// and 14 per diagonal one). Must be positive.
    fn cost(&self, from: Coord, to: Coord) -> i32;
}

/// Adds the goal-directed estimate that turns uniform-cost search into A*.
pub trait AstarPather: WeightedPather {
    /// Lower bound on the cost from `from` to `to`, in [`cost`] units. On an
    /// 8-connected grid the octile distance is the tight choice; anything
    /// larger than the true cost makes
    /// [`Termination::GoalPopped`](crate::Termination::GoalPopped) lose
    /// optimality.
    ///
    /// [`cost`]: WeightedPather::cost
    fn estimate(&self, from: Coord, to: Coord) -> i32;
}
