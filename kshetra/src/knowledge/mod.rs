//! Shared knowledge map.
//!
//! Every agent reads and writes the same [`KnowledgeMap`]. Storage is a
//! sharded concurrent map so that writes to a single cell are atomic
//! without a global lock. Status changes go through [`CellStatus::merge`],
//! which enforces the allowed transitions; the two read-decide-write
//! operations that matter for correctness (frontier insertion and frontier
//! claiming) run under the cell's shard lock.
//!
//! Readers iterating the map may observe a torn snapshot while agents are
//! running. Each individual cell status is always consistent.

mod render;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, CellStatus, ObstacleSource};

/// Tally of cell statuses at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub unexplored: usize,
    pub open: usize,
    pub sensed_obstacles: usize,
    pub claimed: usize,
    pub unreachable: usize,
}

impl CellCounts {
    pub fn total(&self) -> usize {
        self.unexplored + self.open + self.obstacles()
    }

    pub fn obstacles(&self) -> usize {
        self.sensed_obstacles + self.claimed + self.unreachable
    }

    fn add(&mut self, status: CellStatus) {
        match status {
            CellStatus::Unexplored => self.unexplored += 1,
            CellStatus::Open => self.open += 1,
            CellStatus::Obstacle(ObstacleSource::Sensed) => self.sensed_obstacles += 1,
            CellStatus::Obstacle(ObstacleSource::Claimed) => self.claimed += 1,
            CellStatus::Obstacle(ObstacleSource::Unreachable) => self.unreachable += 1,
        }
    }
}

/// Cell to status store shared by all agents.
///
/// Cells are never removed once inserted.
#[derive(Debug, Default)]
pub struct KnowledgeMap {
    cells: DashMap<Cell, CellStatus>,
}

impl KnowledgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status, `None` if the cell has not been discovered.
    #[inline]
    pub fn status(&self, cell: Cell) -> Option<CellStatus> {
        self.cells.get(&cell).map(|entry| *entry)
    }

    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.status(cell).is_some_and(CellStatus::is_open)
    }

    /// True if the cell holds anything other than `Unexplored`.
    #[inline]
    pub fn is_characterized(&self, cell: Cell) -> bool {
        self.status(cell).is_some_and(CellStatus::is_characterized)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Apply a status write under the allowed transitions.
    ///
    /// Returns the status stored after the write.
    pub fn record(&self, cell: Cell, incoming: CellStatus) -> CellStatus {
        match self.cells.entry(cell) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().merge(incoming);
                *entry.get_mut() = merged;
                merged
            }
            Entry::Vacant(entry) => {
                entry.insert(incoming);
                incoming
            }
        }
    }

    pub fn record_open(&self, cell: Cell) -> CellStatus {
        self.record(cell, CellStatus::Open)
    }

    pub fn record_obstacle(&self, cell: Cell) -> CellStatus {
        self.record(cell, CellStatus::Obstacle(ObstacleSource::Sensed))
    }

    /// Insert `Unexplored` if the cell has no entry. Returns true if inserted.
    pub fn insert_frontier(&self, cell: Cell) -> bool {
        match self.cells.entry(cell) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(CellStatus::Unexplored);
                true
            }
        }
    }

    /// Mark a failed planning target so it is not selected again.
    ///
    /// Open cells are left untouched.
    pub fn mark_unreachable(&self, cell: Cell) -> CellStatus {
        self.record(cell, CellStatus::Obstacle(ObstacleSource::Unreachable))
    }

    /// Nearest `Unexplored` cell by Manhattan distance.
    ///
    /// Ties resolve to the smallest `(x, y)` so the choice is deterministic.
    pub fn nearest_unexplored(&self, from: Cell) -> Option<Cell> {
        self.cells
            .iter()
            .filter(|entry| entry.value().is_unexplored())
            .map(|entry| *entry.key())
            .min_by_key(|cell| (from.manhattan_distance(cell), cell.x, cell.y))
    }

    /// Atomically turn an `Unexplored` cell into a claimed obstacle.
    ///
    /// Returns false if the cell is no longer `Unexplored`.
    pub fn try_claim(&self, cell: Cell) -> bool {
        match self.cells.get_mut(&cell) {
            Some(mut entry) if entry.is_unexplored() => {
                *entry = CellStatus::Obstacle(ObstacleSource::Claimed);
                true
            }
            _ => false,
        }
    }

    /// Select and claim the nearest `Unexplored` cell.
    ///
    /// If another agent claims or senses the chosen cell between lookup and
    /// claim, the lookup is repeated.
    pub fn claim_nearest_unexplored(&self, from: Cell) -> Option<Cell> {
        loop {
            let candidate = self.nearest_unexplored(from)?;
            if self.try_claim(candidate) {
                return Some(candidate);
            }
            log::trace!("[KnowledgeMap] Lost claim race for {candidate}, retrying");
        }
    }

    /// Frontier selection, claiming the result when `claim` is set.
    pub fn select_frontier(&self, from: Cell, claim: bool) -> Option<Cell> {
        if claim {
            self.claim_nearest_unexplored(from)
        } else {
            self.nearest_unexplored(from)
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for entry in self.cells.iter() {
            counts.add(*entry.value());
        }
        counts
    }

    /// Copy of all entries sorted by `(y, x)`.
    pub fn snapshot(&self) -> Vec<(Cell, CellStatus)> {
        let mut cells: Vec<(Cell, CellStatus)> = self
            .cells
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        cells.sort_unstable_by_key(|(cell, _)| (cell.y, cell.x));
        cells
    }

    /// Visit every entry. The closure must not write to the map.
    pub fn for_each(&self, mut f: impl FnMut(Cell, CellStatus)) {
        for entry in self.cells.iter() {
            f(*entry.key(), *entry.value());
        }
    }
}

impl FromIterator<(Cell, CellStatus)> for KnowledgeMap {
    fn from_iter<I: IntoIterator<Item = (Cell, CellStatus)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
