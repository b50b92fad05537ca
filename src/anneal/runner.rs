//! Adaptive annealing execution loop.

use super::config::AnnealConfig;
use super::types::AnnealingProblem;
use super::window::{adapt_temperature, AcceptanceWindow, Adjustment};
use crate::error::{AllocError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<S: Clone> {
    /// The best solution observed during the run.
    pub best: S,

    /// Score of the best solution.
    pub best_score: f64,

    /// Number of executed iterations (proposed moves).
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Number of iterations on which the temperature was raised.
    pub reheats: usize,

    /// Whether the run stopped because the problem admitted no move.
    pub stalled: bool,

    /// Temperature after each executed iteration. Empty when
    /// [`AnnealConfig::record_trace`] is off.
    pub temperature_trace: Vec<f64>,

    /// Best score sampled every `window_size` iterations.
    pub best_score_history: Vec<f64>,
}

/// Executes the adaptive annealing controller.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs one annealing trajectory.
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidConfiguration`] if `config` does not validate.
    pub fn run<P: AnnealingProblem>(
        problem: &P,
        config: &AnnealConfig,
    ) -> Result<AnnealResult<P::Solution>> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut current = problem.initial_solution(&mut rng);
        let mut current_score = problem.score(&current);
        let mut best = current.clone();
        let mut best_score = current_score;

        let mut temperature = config.initial_temperature;
        let mut window = AcceptanceWindow::new(config.window_size);
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut reheats = 0usize;
        let mut stalled = false;

        let mut temperature_trace = if config.record_trace {
            Vec::with_capacity(config.max_iterations.min(1 << 16))
        } else {
            Vec::new()
        };
        let mut best_score_history = vec![best_score];

        while iterations < config.max_iterations {
            if temperature < config.min_temperature {
                debug!(iterations, temperature, "temperature below floor, stopping");
                break;
            }

            let Some(candidate) = problem.neighbor(&current, &mut rng) else {
                debug!(iterations, "no neighbor move exists, stopping");
                stalled = true;
                break;
            };
            let delta = candidate.delta;

            // Metropolis criterion
            let accept = if delta > 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random::<f64>() < acceptance_probability(delta, temperature)
            };

            if accept {
                current = candidate.solution;
                current_score += delta;
                accepted_moves += 1;

                if current_score > best_score {
                    best = current.clone();
                    best_score = current_score;
                    trace!(iterations, best_score, "new best");
                }
            }

            window.push(accept);
            let (next, adjustment) = adapt_temperature(temperature, &window, config);
            if adjustment == Adjustment::Reheated && next > temperature {
                reheats += 1;
                debug!(iterations, from = temperature, to = next, "reheat");
            }
            temperature = next;
            iterations += 1;

            if config.record_trace {
                temperature_trace.push(temperature);
            }
            if iterations.is_multiple_of(config.window_size) {
                best_score_history.push(best_score);
            }
        }

        // Drop the drift accumulated from summing deltas.
        best_score = problem.score(&best);
        if best_score_history
            .last()
            .is_none_or(|&last| (last - best_score).abs() > 1e-9)
        {
            best_score_history.push(best_score);
        }

        Ok(AnnealResult {
            best,
            best_score,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            reheats,
            stalled,
            temperature_trace,
            best_score_history,
        })
    }

    /// Runs `runs` independent trajectories and keeps the best one.
    ///
    /// With a seed set, run `i` uses `seed + i`, so the whole batch is
    /// reproducible. Ties go to the lowest run index. Runs execute on
    /// rayon when the `parallel` feature is enabled.
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidConfiguration`] if `runs` is zero or `config`
    /// does not validate.
    pub fn run_multi_start<P: AnnealingProblem>(
        problem: &P,
        config: &AnnealConfig,
        runs: usize,
    ) -> Result<AnnealResult<P::Solution>> {
        if runs == 0 {
            return Err(AllocError::invalid("runs must be at least 1"));
        }
        config.validate()?;

        let configs: Vec<AnnealConfig> = (0..runs)
            .map(|i| {
                let seed = match config.seed {
                    Some(seed) => seed.wrapping_add(i as u64),
                    None => rand::random(),
                };
                config.clone().with_seed(seed)
            })
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<Result<AnnealResult<P::Solution>>> = {
            use rayon::prelude::*;
            configs.par_iter().map(|c| Self::run(problem, c)).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<AnnealResult<P::Solution>>> =
            configs.iter().map(|c| Self::run(problem, c)).collect();

        let mut best: Option<AnnealResult<P::Solution>> = None;
        for result in results {
            let result = result?;
            if best
                .as_ref()
                .is_none_or(|b| result.best_score > b.best_score)
            {
                best = Some(result);
            }
        }
        best.ok_or_else(|| AllocError::invalid("runs must be at least 1"))
    }
}

/// `exp(delta / temperature)` clamped to [0, 1]; NaN maps to 0.
fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    let p = (delta / temperature).exp();
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::Candidate;

    // ---- OneMax: maximize the number of set bits ----

    struct OneMax {
        n: usize,
    }

    impl AnnealingProblem for OneMax {
        type Solution = Vec<bool>;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
            (0..self.n).map(|_| rng.random_bool(0.5)).collect()
        }

        fn score(&self, bits: &Vec<bool>) -> f64 {
            bits.iter().filter(|&&b| b).count() as f64
        }

        fn neighbor<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Option<Candidate<Vec<bool>>> {
            let i = rng.random_range(0..self.n);
            let mut next = bits.clone();
            next[i] = !next[i];
            let delta = if next[i] { 1.0 } else { -1.0 };
            Some(Candidate {
                solution: next,
                delta,
            })
        }
    }

    /// A problem with no moves at all.
    struct Frozen;

    impl AnnealingProblem for Frozen {
        type Solution = u8;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> u8 {
            0
        }

        fn score(&self, _s: &u8) -> f64 {
            1.0
        }

        fn neighbor<R: Rng>(&self, _s: &u8, _rng: &mut R) -> Option<Candidate<u8>> {
            None
        }
    }

    #[test]
    fn test_onemax_reaches_optimum() {
        let problem = OneMax { n: 30 };
        let config = AnnealConfig::default()
            .with_max_iterations(5_000)
            .with_initial_temperature(5.0)
            .with_min_temperature(1e-6)
            .with_seed(42);

        let result = AnnealRunner::run(&problem, &config).unwrap();

        assert!(
            result.best_score >= 28.0,
            "expected near-optimal score, got {}",
            result.best_score
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_max_iterations_limit() {
        let problem = OneMax { n: 10 };
        let config = AnnealConfig::default()
            .with_max_iterations(100)
            .with_min_temperature(1e-12)
            .with_seed(1);

        let result = AnnealRunner::run(&problem, &config).unwrap();
        assert!(result.iterations <= 100);
        assert_eq!(result.temperature_trace.len(), result.iterations);
    }

    #[test]
    fn test_stops_below_min_temperature() {
        // Every uphill flip is accepted and rate stays high, so it cools
        // until the floor ends the run well before the budget.
        let problem = OneMax { n: 1_000 };
        let config = AnnealConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.5)
            .with_max_iterations(10_000)
            .with_seed(3);

        let result = AnnealRunner::run(&problem, &config).unwrap();
        assert!(result.iterations < 10_000);
        assert!(result.final_temperature < 0.5);
    }

    #[test]
    fn test_trace_disabled() {
        let problem = OneMax { n: 10 };
        let config = AnnealConfig::default()
            .with_max_iterations(50)
            .with_record_trace(false)
            .with_seed(9);

        let result = AnnealRunner::run(&problem, &config).unwrap();
        assert!(result.temperature_trace.is_empty());
    }

    #[test]
    fn test_best_history_non_decreasing() {
        let problem = OneMax { n: 40 };
        let config = AnnealConfig::default()
            .with_max_iterations(3_000)
            .with_seed(11);

        let result = AnnealRunner::run(&problem, &config).unwrap();
        for w in result.best_score_history.windows(2) {
            assert!(
                w[1] >= w[0] - 1e-10,
                "best score history must be non-decreasing: {} < {}",
                w[1],
                w[0]
            );
        }
    }

    #[test]
    fn test_no_moves_stalls() {
        let config = AnnealConfig::default().with_seed(0);
        let result = AnnealRunner::run(&Frozen, &config).unwrap();
        assert!(result.stalled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_score, 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnnealConfig::default().with_cooling_factor(2.0);
        assert!(matches!(
            AnnealRunner::run(&OneMax { n: 4 }, &config),
            Err(AllocError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_seeded_runs_identical() {
        let problem = OneMax { n: 25 };
        let config = AnnealConfig::default()
            .with_max_iterations(1_000)
            .with_seed(2024);

        let a = AnnealRunner::run(&problem, &config).unwrap();
        let b = AnnealRunner::run(&problem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.temperature_trace, b.temperature_trace);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_multi_start_at_least_as_good_as_first_run() {
        let problem = OneMax { n: 30 };
        let config = AnnealConfig::default()
            .with_max_iterations(300)
            .with_seed(5);

        let single = AnnealRunner::run(&problem, &config).unwrap();
        let multi = AnnealRunner::run_multi_start(&problem, &config, 4).unwrap();
        assert!(multi.best_score >= single.best_score);
    }

    #[test]
    fn test_multi_start_zero_runs() {
        let config = AnnealConfig::default();
        assert!(AnnealRunner::run_multi_start(&OneMax { n: 4 }, &config, 0).is_err());
    }

    #[test]
    fn test_acceptance_probability_clamped() {
        assert_eq!(acceptance_probability(0.0, 1.0), 1.0);
        assert_eq!(acceptance_probability(-1e308, 1e-300), 0.0);
        assert_eq!(acceptance_probability(-1.0, 0.0), 0.0);
        let p = acceptance_probability(-1.0, 1.0);
        assert!(p > 0.36 && p < 0.37);
    }
}
