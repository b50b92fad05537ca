//! Annealing configuration and temperature feedback parameters.

use crate::error::{AllocError, Result};

/// What happens to the temperature when the recent acceptance rate sits
/// between `reheat_threshold` and `target_acceptance_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeutralZone {
    /// Leave the temperature unchanged.
    #[default]
    Hold,

    /// Apply a gentle multiplicative cooling, factor in (0, 1].
    Cool(f64),
}

/// Configuration for the adaptive annealing controller.
///
/// The temperature is steered by the acceptance rate over the last
/// `window_size` moves, not by the iteration count:
///
/// - rate above `target_acceptance_rate`: multiply by `cooling_factor`
/// - rate below `reheat_threshold`: multiply by `reheat_factor`, capped at
///   `initial_temperature`
/// - otherwise: [`NeutralZone`]
///
/// # Examples
///
/// ```
/// use u_seating::anneal::{AnnealConfig, NeutralZone};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(50.0)
///     .with_max_iterations(5_000)
///     .with_neutral_zone(NeutralZone::Cool(0.999))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature. Also the ceiling for reheating.
    pub initial_temperature: f64,

    /// Floor. The run stops once the temperature drops below it.
    pub min_temperature: f64,

    /// Iteration budget (one proposed move per iteration).
    pub max_iterations: usize,

    /// Number of recent accept/reject outcomes used to estimate the
    /// acceptance rate.
    pub window_size: usize,

    /// Acceptance rate above which the search cools.
    pub target_acceptance_rate: f64,

    /// Acceptance rate below which the search reheats.
    pub reheat_threshold: f64,

    /// Multiplicative cooling factor in (0, 1).
    pub cooling_factor: f64,

    /// Multiplicative reheating factor, > 1.
    pub reheat_factor: f64,

    /// Behaviour between the two thresholds.
    pub neutral_zone: NeutralZone,

    /// Random seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    /// Whether to keep the per-iteration temperature trace.
    pub record_trace: bool,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 0.01,
            max_iterations: 10_000,
            window_size: 100,
            target_acceptance_rate: 0.3,
            reheat_threshold: 0.1,
            cooling_factor: 0.95,
            reheat_factor: 1.1,
            neutral_zone: NeutralZone::Hold,
            seed: None,
            record_trace: true,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_window_size(mut self, n: usize) -> Self {
        self.window_size = n;
        self
    }

    pub fn with_target_acceptance_rate(mut self, rate: f64) -> Self {
        self.target_acceptance_rate = rate;
        self
    }

    pub fn with_reheat_threshold(mut self, rate: f64) -> Self {
        self.reheat_threshold = rate;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_reheat_factor(mut self, factor: f64) -> Self {
        self.reheat_factor = factor;
        self
    }

    pub fn with_neutral_zone(mut self, zone: NeutralZone) -> Self {
        self.neutral_zone = zone;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_record_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(AllocError::invalid("initial_temperature must be positive"));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(AllocError::invalid("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(AllocError::invalid(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if self.window_size == 0 {
            return Err(AllocError::invalid("window_size must be at least 1"));
        }
        for (name, rate) in [
            ("target_acceptance_rate", self.target_acceptance_rate),
            ("reheat_threshold", self.reheat_threshold),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(AllocError::invalid(format!(
                    "{name} must be in [0, 1], got {rate}"
                )));
            }
        }
        if self.reheat_threshold > self.target_acceptance_rate {
            return Err(AllocError::invalid(
                "reheat_threshold must not exceed target_acceptance_rate",
            ));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(AllocError::invalid(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if !self.reheat_factor.is_finite() || self.reheat_factor <= 1.0 {
            return Err(AllocError::invalid(format!(
                "reheat_factor must be greater than 1, got {}",
                self.reheat_factor
            )));
        }
        if let NeutralZone::Cool(factor) = self.neutral_zone {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(AllocError::invalid(format!(
                    "neutral cooling factor must be in (0, 1], got {factor}"
                )));
            }
        }
        Ok(())
    }
}
