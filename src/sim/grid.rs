//! Barrier occupancy for the N x N board
//!
//! Pure query/mutation with no physics. Boundary collision is the stepper's
//! job, so any coordinate outside the board reads as open space here.
//! Occupancy rules (no barrier under the ball or hole, no edits mid-shot)
//! are enforced by the session, which owns both.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// N x N set of boolean barrier flags, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridModel {
    size: usize,
    cells: Vec<bool>,
}

impl GridModel {
    /// Open board with no barriers
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Deterministically scatter up to `barriers` cells from `seed`,
    /// never occupying a cell in `keep_out` (ball start, hole).
    ///
    /// Same seed, same course - course variety between runs comes from the
    /// seed, exactly like the wave generator this is modeled on.
    pub fn scatter(size: usize, seed: u64, barriers: usize, keep_out: &[(i32, i32)]) -> Self {
        let mut grid = Self::empty(size);
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut placed = 0;
        let mut attempts = 0;
        let max_attempts = size * size * 8;
        while placed < barriers && attempts < max_attempts {
            attempts += 1;
            let cell = (
                rng.random_range(0..size) as i32,
                rng.random_range(0..size) as i32,
            );
            if keep_out.contains(&cell) || grid.is_set(cell) {
                continue;
            }
            grid.set(cell, true);
            placed += 1;
        }
        log::debug!("scattered {placed} barriers (seed {seed})");
        grid
    }

    /// Board side length in cells
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell containing the continuous position `(x, y)` holds
    /// a barrier. Out-of-grid coordinates are open space.
    pub fn has_barrier(&self, x: f32, y: f32) -> bool {
        self.is_set((x.floor() as i32, y.floor() as i32))
    }

    /// Whether an integer cell holds a barrier; `false` out of bounds
    pub fn is_set(&self, cell: (i32, i32)) -> bool {
        self.index(cell).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Set or clear a cell; no-op out of bounds
    pub fn set(&mut self, cell: (i32, i32), value: bool) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = value;
        }
    }

    /// Flip a cell; no-op out of bounds
    pub fn toggle(&mut self, cell: (i32, i32)) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = !self.cells[i];
        }
    }

    /// Whether an integer cell lies on the board
    pub fn in_bounds(&self, cell: (i32, i32)) -> bool {
        self.index(cell).is_some()
    }

    /// Number of barrier cells currently set
    pub fn barrier_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn index(&self, (cx, cy): (i32, i32)) -> Option<usize> {
        let n = self.size as i32;
        if cx >= 0 && cx < n && cy >= 0 && cy < n {
            Some(cy as usize * self.size + cx as usize)
        } else {
            None
        }
    }
}
