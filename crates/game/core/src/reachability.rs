//! Movement reachability under height and occupancy constraints.
//!
//! The search is a breadth-first flood over the 8-neighbourhood, bounded by
//! Manhattan distance from the start cell. Every edge is checked against:
//!
//! 1. ground and bounds of the target cell,
//! 2. occupancy (any unit other than the mover blocks the cell, so nobody
//!    walks through allies either; the mover's own cell never blocks),
//! 3. the climb rule: a cell above the climb threshold can only be entered
//!    from a reachable neighbour at most `max_climb_height` below it,
//! 4. corner squeezing: a diagonal step is refused when both orthogonal
//!    corner cells hold hostile units.
//!
//! A cell rejected along one edge stays eligible along every other edge, so
//! the result is the connected component of the start under these rules and
//! does not depend on visiting order. Results are recomputed on demand and
//! never patched incrementally.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::config::BattleConfig;
use crate::env::TerrainOracle;
use crate::state::{BattleState, Cell, GridPos, UnitId};

/// Height limits applied to every step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimbRules {
    pub threshold: f32,
    pub max_height: f32,
}

impl ClimbRules {
    pub fn from_config(config: &BattleConfig) -> Self {
        Self {
            threshold: config.climb_threshold,
            max_height: config.max_climb_height,
        }
    }

    /// Whether a step from a cell at `from` height onto one at `to` height is allowed.
    pub fn allows(&self, from: f32, to: f32) -> bool {
        to <= self.threshold || to - from <= self.max_height
    }
}

/// How a cell's occupant affects a moving unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Passage {
    /// Empty, or the mover itself.
    Free,
    /// Friendly occupant: cannot be entered.
    Occupied,
    /// Hostile occupant: cannot be entered and seals diagonal corners.
    Blocked,
}

/// Input to a reachability search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReachQuery {
    pub start: GridPos,
    /// Movement budget in whole-cell Manhattan steps.
    pub budget: u32,
}

/// Cells a unit may legally move to, with the BFS tree used to build paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachableSet {
    start: GridPos,
    destinations: BTreeSet<Cell>,
    parents: BTreeMap<Cell, Cell>,
}

impl ReachableSet {
    pub fn empty(start: GridPos) -> Self {
        Self {
            start,
            destinations: BTreeSet::new(),
            parents: BTreeMap::new(),
        }
    }

    pub fn start(&self) -> GridPos {
        self.start
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.surface == self.start.surface && self.destinations.contains(&pos.cell)
    }

    /// Legal destinations in ascending cell order.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        let surface = self.start.surface;
        self.destinations
            .iter()
            .map(move |&cell| GridPos::new(surface, cell))
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Ordered cells from the start (inclusive) to `target` (inclusive).
    pub fn path_to(&self, target: GridPos) -> Option<Vec<GridPos>> {
        if !self.contains(target) {
            return None;
        }
        let mut path = vec![target];
        let mut cursor = target.cell;
        while cursor != self.start.cell {
            cursor = *self.parents.get(&cursor)?;
            path.push(target.with_cell(cursor));
        }
        path.reverse();
        Some(path)
    }
}

/// Computes the reachable set with a caller-supplied occupancy classifier.
pub fn compute<F>(
    terrain: &dyn TerrainOracle,
    query: ReachQuery,
    rules: ClimbRules,
    passage: F,
) -> ReachableSet
where
    F: Fn(GridPos) -> Passage,
{
    let start = query.start;
    let mut result = ReachableSet::empty(start);
    if query.budget == 0 {
        return result;
    }

    let height_of = |cell: Cell| terrain.height_at(start.with_cell(cell));
    let hostile = |cell: Cell| passage(start.with_cell(cell)) == Passage::Blocked;

    let mut visited = BTreeSet::from([start.cell]);
    let mut queue = VecDeque::from([start.cell]);

    while let Some(current) = queue.pop_front() {
        let current_height = height_of(current).unwrap_or(0.0);

        for next in current.neighbors() {
            if visited.contains(&next) || next.manhattan(start.cell) > query.budget {
                continue;
            }
            let pos = start.with_cell(next);
            if !terrain.is_within_bounds(pos) {
                continue;
            }
            let Some(next_height) = height_of(next) else {
                continue;
            };
            if passage(pos) != Passage::Free || !rules.allows(current_height, next_height) {
                continue;
            }
            if current.is_diagonal_to(next)
                && hostile(Cell::new(current.x, next.z))
                && hostile(Cell::new(next.x, current.z))
            {
                continue;
            }

            visited.insert(next);
            result.parents.insert(next, current);
            result.destinations.insert(next);
            queue.push_back(next);
        }
    }

    result
}

/// Computes where `mover` can go this action, using its current move points
/// as the budget and unit allegiance for blocking.
pub fn reachable_for(
    state: &BattleState,
    terrain: &dyn TerrainOracle,
    config: &BattleConfig,
    mover: UnitId,
) -> Option<ReachableSet> {
    let unit = state.unit(mover)?;
    let start = unit.position?;
    let query = ReachQuery {
        start,
        budget: unit.stats.current_mp,
    };
    let faction = unit.faction;

    Some(compute(
        terrain,
        query,
        ClimbRules::from_config(config),
        |pos| match state.occupant_at(pos) {
            None => Passage::Free,
            Some(other) if other.id == mover => Passage::Free,
            Some(other) if other.faction.is_hostile_to(faction) => Passage::Blocked,
            Some(_) => Passage::Occupied,
        },
    ))
}
