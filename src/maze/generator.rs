//! Maze generation using a randomized recursive backtracker.
//!
//! This module produces the connectivity [`Grid`] of a perfect maze: every
//! cell is reachable from every other cell through exactly one path. The
//! grid is purely topological; [`crate::maze::layout`] turns it into placed
//! geometry.
//!
//! # Examples
//!
//! ```rust
//! use mouse_maze::maze::generator::{MazeGenerator, StartCell};
//! use mouse_maze::rng::session_rng;
//!
//! let generator = MazeGenerator::new(8, StartCell::Origin).unwrap();
//! let grid = generator.generate(&mut session_rng(Some(7)));
//! assert_eq!(grid.passage_count(), 8 * 8 - 1);
//! ```

use crate::error::{MazeError, Result};
use crate::rng::{RandomIndex, session_rng};
use serde::{Deserialize, Serialize};

/// Represents a cell in the maze grid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column index of the cell along the world x axis
    pub x: usize,
    /// Row index of the cell along the world z axis
    pub z: usize,
}

impl Cell {
    /// Creates a new Cell with the given coordinates
    pub fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }
}

/// The four passage directions of a cell.
///
/// Discriminants are the slot indices of the connectivity mask and of the
/// generator's direction draws: `+x`, `+z`, `-x`, `-z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `+x`
    East = 0,
    /// `+z`
    South = 1,
    /// `-x`
    West = 2,
    /// `-z`
    North = 3,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % 4]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back, `(d + 2) mod 4`.
    pub fn opposite(self) -> Direction {
        Self::from_index(self.index() + 2)
    }
}

/// Where the backtracker begins carving.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartCell {
    /// Always start at `(0, 0)`.
    #[default]
    Origin,
    /// Start at a uniformly random cell (x drawn first, then z).
    Random,
}

/// Connectivity of an `N x N` maze.
///
/// Each cell stores a 4-bit mask, one bit per [`Direction`], set when a
/// passage leads to the neighbour in that direction. Passages are always
/// recorded on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    connections: Vec<u8>,
    start: Cell,
}

impl Grid {
    /// Creates a fully walled grid.
    fn closed(size: usize, start: Cell) -> Self {
        Self {
            size,
            connections: vec![0; size * size],
            start,
        }
    }

    /// Side length N of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The cell generation started from.
    pub fn start(&self) -> Cell {
        self.start
    }

    fn slot(&self, cell: Cell) -> usize {
        cell.z * self.size + cell.x
    }

    /// Whether a passage leaves `cell` in `direction`.
    ///
    /// Cells outside the grid are never open.
    pub fn is_open(&self, cell: Cell, direction: Direction) -> bool {
        if cell.x >= self.size || cell.z >= self.size {
            return false;
        }
        self.connections[self.slot(cell)] & (1 << direction.index()) != 0
    }

    /// Raw connectivity mask of a cell, bit `d` set for an open direction `d`.
    ///
    /// Cells outside the grid have an empty mask.
    pub fn mask(&self, cell: Cell) -> u8 {
        if cell.x >= self.size || cell.z >= self.size {
            return 0;
        }
        self.connections[self.slot(cell)]
    }

    /// Gets the cell adjacent to `cell` in `direction`, or `None` when it
    /// would fall outside the grid.
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let Cell { x, z } = cell;
        match direction {
            Direction::East if x + 1 < self.size => Some(Cell::new(x + 1, z)),
            Direction::South if z + 1 < self.size => Some(Cell::new(x, z + 1)),
            Direction::West if x > 0 => Some(Cell::new(x - 1, z)),
            Direction::North if z > 0 => Some(Cell::new(x, z - 1)),
            _ => None,
        }
    }

    fn open(&mut self, cell: Cell, direction: Direction, neighbor: Cell) {
        let here = self.slot(cell);
        let there = self.slot(neighbor);
        self.connections[here] |= 1 << direction.index();
        self.connections[there] |= 1 << direction.opposite().index();
    }

    /// Iterates every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |z| (0..self.size).map(move |x| Cell::new(x, z)))
    }

    /// Number of open passages, each shared pair counted once.
    pub fn passage_count(&self) -> usize {
        self.cells()
            .map(|cell| {
                usize::from(self.is_open(cell, Direction::East))
                    + usize::from(self.is_open(cell, Direction::South))
            })
            .sum()
    }

    /// Number of cells reachable from the start cell through passages.
    pub fn reachable_from_start(&self) -> usize {
        let mut seen = vec![false; self.size * self.size];
        let mut stack = vec![self.start];
        seen[self.slot(self.start)] = true;
        let mut count = 0;

        while let Some(cell) = stack.pop() {
            count += 1;
            for direction in Direction::ALL {
                if !self.is_open(cell, direction) {
                    continue;
                }
                if let Some(next) = self.neighbor(cell, direction) {
                    let slot = self.slot(next);
                    if !seen[slot] {
                        seen[slot] = true;
                        stack.push(next);
                    }
                }
            }
        }

        count
    }
}

/// One pending cell of the backtracker.
///
/// The explicit stack replays the recursive algorithm exactly, including the
/// order of random draws, without tying maze size to the thread stack.
struct Frame {
    cell: Cell,
    tried: [bool; 4],
    attempts: usize,
}

impl Frame {
    fn new(cell: Cell) -> Self {
        Self {
            cell,
            tried: [false; 4],
            attempts: 0,
        }
    }
}

/// Picks the next direction slot from a raw draw.
///
/// Starting at `draw`, advances cyclically to the first slot not yet tried
/// and marks it. This is not a uniform shuffle: slots following already
/// tried ones are favoured, and mazes depend on that exact order.
pub(crate) fn next_untried(tried: &mut [bool; 4], draw: usize) -> Direction {
    let mut slot = draw % 4;
    while tried[slot] {
        slot = (slot + 1) % 4;
    }
    tried[slot] = true;
    Direction::from_index(slot)
}

/// Randomized recursive backtracker for square mazes.
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    size: usize,
    start: StartCell,
}

impl MazeGenerator {
    /// Creates a generator for an `size x size` maze.
    ///
    /// # Errors
    /// Returns [`MazeError::InvalidConfiguration`] when `size` is zero.
    pub fn new(size: usize, start: StartCell) -> Result<Self> {
        if size == 0 {
            return Err(MazeError::invalid("maze size must be at least 1"));
        }
        Ok(Self { size, start })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Carves a new maze.
    ///
    /// At each cell four attempts are made; each draws a slot from `0..4`,
    /// resolves it with [`next_untried`], and descends into the neighbour
    /// when it is inside the grid and unvisited. Out-of-bounds directions
    /// still use up their attempt.
    pub fn generate<R: RandomIndex + ?Sized>(&self, rng: &mut R) -> Grid {
        let n = self.size;
        let start = match self.start {
            StartCell::Origin => Cell::new(0, 0),
            StartCell::Random => {
                let x = rng.random_index(n);
                let z = rng.random_index(n);
                Cell::new(x, z)
            }
        };

        let mut grid = Grid::closed(n, start);
        let mut visited = vec![false; n * n];
        visited[grid.slot(start)] = true;

        let mut stack = Vec::with_capacity(n * n);
        stack.push(Frame::new(start));

        while let Some(frame) = stack.last_mut() {
            if frame.attempts == 4 {
                stack.pop();
                continue;
            }
            frame.attempts += 1;

            let direction = next_untried(&mut frame.tried, rng.random_index(4));
            let cell = frame.cell;
            let Some(next) = grid.neighbor(cell, direction) else {
                continue;
            };

            let slot = grid.slot(next);
            if !visited[slot] {
                visited[slot] = true;
                grid.open(cell, direction, next);
                stack.push(Frame::new(next));
            }
        }

        grid
    }
}

/// Generates a maze of side `size`, seeded when `seed` is given.
pub fn generate_maze(size: usize, seed: Option<u64>) -> Result<Grid> {
    let generator = MazeGenerator::new(size, StartCell::Origin)?;
    Ok(generator.generate(&mut session_rng(seed)))
}
