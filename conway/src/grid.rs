// grid.rs - Grid types for Conway's Game of Life

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::IoError;

pub const ALIVE: u8 = 255;
pub const DEAD: u8 = 0;

/// A coordinate on the board. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Row-major board of `height × width` bytes, each either [`ALIVE`] or [`DEAD`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// An all-dead board.
    pub fn dead(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![DEAD; width * height] }
    }

    /// Builds a board from raw row-major bytes as delivered by a grid source.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, IoError> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(IoError::ShortRead { expected, actual: cells.len() });
        }
        if let Some(i) = cells.iter().position(|&v| v != ALIVE && v != DEAD) {
            return Err(IoError::InvalidCell { x: i % width, y: i / width, value: cells[i] });
        }
        Ok(Self { width, height, cells })
    }

    /// Reassembles worker output. The rules only ever produce valid cells.
    pub(crate) fn from_band_cells(width: usize, height: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    /// Convenience constructor used by patterns and tests.
    pub fn with_alive(width: usize, height: usize, alive: &[Cell]) -> Self {
        let mut grid = Self::dead(width, height);
        for cell in alive {
            if cell.x < width && cell.y < height {
                grid.cells[cell.y * width + cell.x] = ALIVE;
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == ALIVE
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Every alive cell, in row-major order.
    pub fn alive_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == ALIVE)
            .map(|(i, _)| Cell::new(i % self.width, i / self.width))
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == ALIVE).count()
    }

    /// Cells whose state differs between `self` and `next`, in row-major order.
    /// Both boards must have the same dimensions.
    pub fn flipped_cells(&self, next: &Grid) -> Vec<Cell> {
        debug_assert_eq!((self.width, self.height), (next.width, next.height));
        self.cells
            .iter()
            .zip(&next.cells)
            .enumerate()
            .filter(|&(_, (a, b))| a != b)
            .map(|(i, _)| Cell::new(i % self.width, i / self.width))
            .collect()
    }
}

struct World {
    grid: Arc<Grid>,
    completed_turns: usize,
}

/// The board shared between the turn loop and its background tasks.
///
/// All access goes through [`SharedWorld::read`] and [`SharedWorld::swap`], which
/// take the same lock, so nobody can observe a half-replaced board. The completed
/// turn count sits behind the same lock and is always consistent with the grid.
pub struct SharedWorld {
    inner: Mutex<World>,
}

impl SharedWorld {
    pub fn new(grid: Grid) -> Self {
        Self { inner: Mutex::new(World { grid: Arc::new(grid), completed_turns: 0 }) }
    }

    /// Runs `f` against the current board and its completed turn count.
    pub fn read<R>(&self, f: impl FnOnce(&Grid, usize) -> R) -> R {
        // The world is only ever replaced wholesale, so a poisoned lock still guards
        // a complete board.
        let world = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&world.grid, world.completed_turns)
    }

    /// Cheap handle on the current board for workers to read without the lock.
    pub fn snapshot(&self) -> Arc<Grid> {
        let world = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&world.grid)
    }

    /// Installs the board for `completed_turns` and hands back the previous one.
    pub fn swap(&self, next: Grid, completed_turns: usize) -> Arc<Grid> {
        let mut world = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        world.completed_turns = completed_turns;
        std::mem::replace(&mut world.grid, Arc::new(next))
    }
}
