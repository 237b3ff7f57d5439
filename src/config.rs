//! Command-line configuration.
//!
//! Defaults follow the dashboard (12x12, 25% live, 5 steps per run) and the
//! printing demo (5x5, half live, 3 generations).

use std::io;

use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};

use crate::{patterns, proc::Grid, sim::Simulation};

/// Smallest side the dashboard resizes down to.
pub const MIN_SIDE: usize = 5;
/// Largest side the dashboard resizes up to.
pub const MAX_SIDE: usize = 30;
/// Upper bound for the dashboard's "run N steps" setting.
pub const MAX_RUN_STEPS: u64 = 100;
/// Live probability adjustments happen in 5% increments.
pub const PROBABILITY_STEP_PCT: u8 = 5;

#[derive(Parser, Debug)]
#[command(name = "life_board", version, about = "Conway's Game of Life on a bounded grid")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a random grid, then each of the next few generations.
    Demo(DemoArgs),
    /// Redraw the grid in place for a number of generations.
    Animate(AnimateArgs),
    /// Interactive dashboard.
    Play(PlayArgs),
}

/// Where the first grid comes from. Random unless a pattern or stdin is given.
#[derive(Args, Debug, Clone, Default)]
pub struct SeedArgs {
    /// Seed for the random generator; the OS supplies one when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from a named pattern centered on an empty grid.
    #[arg(long, conflicts_with = "stdin")]
    pub pattern: Option<String>,

    /// Read the first grid from stdin, one row per line, until a blank line.
    #[arg(long)]
    pub stdin: bool,
}

impl SeedArgs {
    /// First simulation state: text from `read_stdin`, a named pattern, or a random grid.
    ///
    /// `read_stdin` is only called when `--stdin` was given.
    pub fn simulation<F>(
        &self,
        rows: usize,
        cols: usize,
        probability: f64,
        read_stdin: F,
    ) -> Result<Simulation, Box<dyn std::error::Error>>
    where
        F: FnOnce() -> io::Result<String>,
    {
        let rng = self
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let sim = if self.stdin {
            Simulation::from_grid(Grid::parse(&read_stdin()?)?, rng)
        } else if let Some(name) = &self.pattern {
            Simulation::from_grid(patterns::find(name)?.centered(rows, cols)?, rng)
        } else {
            Simulation::with_rng(rows, cols, probability, rng)?
        };
        Ok(sim)
    }
}

#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    #[arg(long, default_value_t = 5)]
    pub cols: usize,

    /// Generations to print after the initial grid.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub steps: u64,

    #[arg(long, default_value_t = 0.5)]
    pub probability: f64,

    #[command(flatten)]
    pub seed: SeedArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AnimateArgs {
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub steps: u64,

    #[arg(long, default_value_t = 0.5)]
    pub probability: f64,

    /// Pause between frames in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub pause_ms: u64,

    #[command(flatten)]
    pub seed: SeedArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[arg(long, default_value_t = 12)]
    pub rows: usize,

    #[arg(long, default_value_t = 12)]
    pub cols: usize,

    /// Live probability for random grids, a multiple of 5 from 0 to 100.
    #[arg(long, default_value_t = 25, value_parser = parse_probability_pct)]
    pub probability_pct: u8,

    /// Generations applied by the "run" key.
    #[arg(
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..=MAX_RUN_STEPS)
    )]
    pub run_steps: u64,

    #[command(flatten)]
    pub seed: SeedArgs,
}

fn parse_probability_pct(s: &str) -> Result<u8, String> {
    let pct: u8 = s.parse().map_err(|e| format!("{s:?} is not a percentage: {e}"))?;
    if pct > 100 || pct % PROBABILITY_STEP_PCT != 0 {
        return Err(format!(
            "{pct} must be a multiple of {PROBABILITY_STEP_PCT} between 0 and 100"
        ));
    }
    Ok(pct)
}

impl PlayArgs {
    pub fn probability(&self) -> f64 {
        f64::from(self.probability_pct) / 100.0
    }
}
