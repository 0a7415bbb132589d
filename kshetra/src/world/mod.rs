//! Ground-truth obstacle layout.
//!
//! The world is built once and shared read-only between agents. Only the
//! sensor consults it; planning works from the knowledge map alone.

mod config;

pub use config::{MAX_GRID_SIDE, WorldConfig};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};

use crate::core::Cell;
use crate::error::{Error, Result};

/// Fixed boolean obstacle field, border always blocked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    width: i32,
    height: i32,
    /// Row-major, `true` = obstacle.
    obstacles: Vec<bool>,
}

impl GridWorld {
    /// A room with only the border blocked.
    pub fn empty(width: i32, height: i32) -> Result<Self> {
        if !(3..=MAX_GRID_SIDE).contains(&width) || !(3..=MAX_GRID_SIDE).contains(&height) {
            return Err(Error::InvalidMap(format!(
                "grid sides must be 3-{MAX_GRID_SIDE}, got {width}x{height}"
            )));
        }
        let mut world = Self {
            width,
            height,
            obstacles: vec![false; (width * height) as usize],
        };
        world.enforce_border();
        Ok(world)
    }

    /// Generate a world, keeping `keep_clear` cells (robot starts) free.
    pub fn generate(config: &WorldConfig, keep_clear: &[Cell]) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::generate_with_rng(config, keep_clear, &mut rng)
    }

    pub fn generate_with_rng<R: Rng>(
        config: &WorldConfig,
        keep_clear: &[Cell],
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let mut world = Self::empty(config.width, config.height)?;

        for y in 1..world.height - 1 {
            for x in 1..world.width - 1 {
                let cell = Cell::new(x, y);
                if keep_clear.contains(&cell) {
                    continue;
                }
                if rng.random_range(0..100u8) < config.obstacle_probability {
                    world.set_obstacle(cell, true);
                }
            }
        }

        log::debug!(
            "[World] Generated {}x{} grid with {} interior obstacles ({}%)",
            world.width,
            world.height,
            world.interior_obstacle_count(),
            config.obstacle_probability
        );
        Ok(world)
    }

    /// Parse a text layout: `#` obstacle, `.` open, one line per row.
    ///
    /// Whitespace around lines is ignored; rows must share one width. The
    /// border is forced to obstacle regardless of the text.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        let mut world = Self::empty(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(Error::InvalidMap(format!(
                    "row {y} has {} columns, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let blocked = match ch {
                    '#' => true,
                    '.' => false,
                    other => {
                        return Err(Error::InvalidMap(format!(
                            "unexpected character '{other}' at ({x}, {y})"
                        )));
                    }
                };
                world.set_obstacle(Cell::new(x as i32, y as i32), blocked);
            }
        }

        world.enforce_border();
        Ok(world)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    /// Ground truth for a cell. Anything outside the grid is blocked.
    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        !self.contains(cell) || self.obstacles[self.index(cell)]
    }

    /// Set or clear an obstacle. Border cells stay blocked.
    pub fn set_obstacle(&mut self, cell: Cell, blocked: bool) {
        if !self.contains(cell) {
            return;
        }
        let idx = self.index(cell);
        self.obstacles[idx] = blocked || self.is_border(cell);
    }

    pub fn is_border(&self, cell: Cell) -> bool {
        cell.x == 0 || cell.y == 0 || cell.x == self.width - 1 || cell.y == self.height - 1
    }

    fn enforce_border(&mut self) {
        for x in 0..self.width {
            self.set_obstacle(Cell::new(x, 0), true);
            self.set_obstacle(Cell::new(x, self.height - 1), true);
        }
        for y in 0..self.height {
            self.set_obstacle(Cell::new(0, y), true);
            self.set_obstacle(Cell::new(self.width - 1, y), true);
        }
    }

    pub fn interior_obstacle_count(&self) -> usize {
        self.cells()
            .filter(|c| !self.is_border(*c) && self.is_obstacle(*c))
            .count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Open cells 4-connected to `start` (breadth-first flood fill).
    pub fn reachable_open_cells(&self, start: Cell) -> HashSet<Cell> {
        let mut visited = HashSet::new();
        if self.is_obstacle(start) {
            return visited;
        }
        let mut queue = VecDeque::from([start]);
        visited.insert(start);

        while let Some(cell) = queue.pop_front() {
            for next in cell.neighbors_4() {
                if !self.is_obstacle(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// Text view of the ground truth, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.is_obstacle(Cell::new(x, y)) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}
