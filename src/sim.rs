//! Simulation driver: one grid, one step counter, and the operations a
//! front end drives them with.
//!
//! The grid and the counter always reset together. Every operation validates
//! its input before touching state, so a rejected call leaves the simulation
//! exactly as it was.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::proc::{self, Grid};

/// A grid plus the number of generations applied to it since the last reset.
#[derive(Debug, Clone)]
pub struct Simulation<R = StdRng> {
    grid: Grid,
    step: u64,
    rng: R,
}

impl Simulation<StdRng> {
    /// Random grid seeded from the operating system.
    pub fn new(rows: usize, cols: usize, live_probability: f64) -> Result<Self> {
        Self::with_rng(rows, cols, live_probability, StdRng::from_os_rng())
    }

    /// Random grid from a fixed seed, for reproducible runs.
    pub fn seeded(rows: usize, cols: usize, live_probability: f64, seed: u64) -> Result<Self> {
        Self::with_rng(rows, cols, live_probability, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(rows: usize, cols: usize, live_probability: f64, mut rng: R) -> Result<Self> {
        let grid = Grid::random(rows, cols, live_probability, &mut rng)?;
        debug!(rows, cols, live_probability, "simulation created");
        Ok(Simulation { grid, step: 0, rng })
    }

    /// Starts from a prepared grid, e.g. a pattern. `rng` serves later randomizes.
    pub fn from_grid(grid: Grid, rng: R) -> Self {
        debug!(rows = grid.rows(), cols = grid.cols(), "simulation created from grid");
        Simulation { grid, step: 0, rng }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations applied since creation or the last reset.
    #[inline]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Applies the rule `n` times in sequence.
    pub fn advance(&mut self, n: u64) -> Result<()> {
        if n < 1 {
            return Err(Error::InvalidArgument {
                reason: "advance needs at least one step".to_owned(),
            });
        }
        let target = self.step.checked_add(n).ok_or(Error::StepOverflow)?;

        for _ in 0..n {
            self.grid = self.grid.step();
            self.step += 1;
            trace!(step = self.step, population = self.grid.population(), "generation");
        }
        debug_assert_eq!(self.step, target);
        debug!(steps = n, step = self.step, "advanced");
        Ok(())
    }

    /// One generation.
    pub fn step_once(&mut self) -> Result<()> {
        self.advance(1)
    }

    /// Fresh random grid at the current size; step back to 0.
    pub fn randomize(&mut self, live_probability: f64) -> Result<()> {
        let (rows, cols) = self.grid.dims();
        self.grid = Grid::random(rows, cols, live_probability, &mut self.rng)?;
        self.step = 0;
        debug!(live_probability, "randomized");
        Ok(())
    }

    /// All-dead grid at the current size; step back to 0.
    pub fn clear(&mut self) {
        self.grid = self.grid.cleared();
        self.step = 0;
        debug!("cleared");
    }

    /// New random grid at `rows x cols` unless that is already the size.
    ///
    /// Arguments are validated even when the size is unchanged.
    pub fn resize(&mut self, rows: usize, cols: usize, live_probability: f64) -> Result<()> {
        proc::check_dims(rows, cols)?;
        proc::check_probability(live_probability)?;

        if self.grid.dims() == (rows, cols) {
            trace!(rows, cols, "resize to current size ignored");
            return Ok(());
        }

        self.grid = Grid::random(rows, cols, live_probability, &mut self.rng)?;
        self.step = 0;
        debug!(rows, cols, live_probability, "resized");
        Ok(())
    }
}
