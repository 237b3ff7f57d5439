use life_board::{
    config::{Cli, Command},
    draw::{self, App},
};

use clap::Parser;
use std::{io::stdin, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Demo(args) => {
            let mut sim = args.seed.simulation(args.rows, args.cols, args.probability, readlines)?;
            info!(rows = sim.rows(), cols = sim.cols(), steps = args.steps, "demo");
            draw::print_demo(&mut sim, args.steps, &mut std::io::stdout().lock())?;
        }
        Command::Animate(args) => {
            let mut sim = args.seed.simulation(args.rows, args.cols, args.probability, readlines)?;
            info!(rows = sim.rows(), cols = sim.cols(), steps = args.steps, "animate");
            draw::animate(&mut sim, args.steps, Duration::from_millis(args.pause_ms))?;
        }
        Command::Play(args) => {
            let sim = args.seed.simulation(args.rows, args.cols, args.probability(), readlines)?;
            info!(rows = sim.rows(), cols = sim.cols(), "dashboard");
            draw::run(App::new(sim, args.probability_pct, args.run_steps))?;
        }
    }
    Ok(())
}

fn readlines() -> std::io::Result<String> {
    let mut s = String::new();
    for w in stdin().lines() {
        let w = w?;
        if !w.is_empty() {
            s.push_str(&w);
            s.push('\n')
        } else {
            break
        }
    }
    Ok(s)
}
