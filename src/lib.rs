pub mod config;
pub mod draw;
pub mod error;
pub mod patterns;
pub mod proc;
pub mod sim;

pub use error::{Error, Result};
pub use proc::Grid;
pub use sim::Simulation;
