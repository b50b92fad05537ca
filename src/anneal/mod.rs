//! Adaptive Simulated Annealing.
//!
//! A single-solution trajectory metaheuristic. Worsening moves are accepted
//! with the Metropolis probability `exp(delta / T)`. Instead of a fixed
//! cooling schedule, the temperature is steered by the acceptance rate over
//! a sliding window of recent moves: the search cools while it accepts too
//! much and reheats when it gets stuck.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Ingber (1989), "Very Fast Simulated Re-Annealing"

mod config;
mod runner;
mod types;
mod window;

pub use config::{AnnealConfig, NeutralZone};
pub use runner::{AnnealResult, AnnealRunner};
pub use types::{AnnealingProblem, Candidate};
pub use window::{adapt_temperature, AcceptanceWindow, Adjustment};
