//! Acceptance window and the temperature feedback policy.

use super::config::{AnnealConfig, NeutralZone};
use std::collections::VecDeque;

/// Bounded FIFO of recent accept/reject outcomes.
///
/// Once full, pushing a new outcome evicts the oldest one.
#[derive(Debug, Clone)]
pub struct AcceptanceWindow {
    outcomes: VecDeque<bool>,
    capacity: usize,
    accepted: usize,
}

impl AcceptanceWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outcomes: VecDeque::with_capacity(capacity),
            capacity,
            accepted: 0,
        }
    }

    pub fn push(&mut self, accepted: bool) {
        if self.outcomes.len() == self.capacity {
            if let Some(true) = self.outcomes.pop_front() {
                self.accepted -= 1;
            }
        }
        self.outcomes.push_back(accepted);
        if accepted {
            self.accepted += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fraction of accepted moves among the last `min(capacity, moves)`
    /// outcomes, or `None` before the first move.
    pub fn rate(&self) -> Option<f64> {
        if self.outcomes.is_empty() {
            None
        } else {
            Some(self.accepted as f64 / self.outcomes.len() as f64)
        }
    }
}

/// Which branch of the feedback policy fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Cooled,
    Reheated,
    Neutral,
}

/// Computes the next temperature from the acceptance window.
///
/// An empty window leaves the temperature untouched.
pub fn adapt_temperature(
    temperature: f64,
    window: &AcceptanceWindow,
    config: &AnnealConfig,
) -> (f64, Adjustment) {
    let Some(rate) = window.rate() else {
        return (temperature, Adjustment::Neutral);
    };

    if rate > config.target_acceptance_rate {
        (temperature * config.cooling_factor, Adjustment::Cooled)
    } else if rate < config.reheat_threshold {
        let reheated = (temperature * config.reheat_factor).min(config.initial_temperature);
        (reheated, Adjustment::Reheated)
    } else {
        match config.neutral_zone {
            NeutralZone::Hold => (temperature, Adjustment::Neutral),
            NeutralZone::Cool(factor) => (temperature * factor, Adjustment::Neutral),
        }
    }
}
