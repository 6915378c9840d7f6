//! Learner configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Step-size schedule for temporal-difference updates.
///
/// `α(round) = initial · decay_base^⌊round / decay_window⌋`. A `decay_base`
/// of 1 keeps the rate constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningRate {
    pub initial: f64,
    pub decay_base: f64,
    /// Number of rounds between decay steps
    pub decay_window: u64,
}

impl LearningRate {
    /// Rate that never decays
    pub fn constant(rate: f64) -> Self {
        Self {
            initial: rate,
            decay_base: 1.0,
            decay_window: 1,
        }
    }

    pub fn at(&self, round: u64) -> f64 {
        let steps = (round / self.decay_window.max(1)).min(i32::MAX as u64) as i32;
        self.initial * self.decay_base.powi(steps)
    }
}

impl Default for LearningRate {
    fn default() -> Self {
        Self {
            initial: 0.3,
            decay_base: 0.95,
            decay_window: 1000,
        }
    }
}

/// Configuration for a [`LearningAgent`](super::LearningAgent).
///
/// # Examples
///
/// ```
/// use noughts::td::{LearnerConfig, LearningRate};
///
/// let config = LearnerConfig::default()
///     .with_greedy(0.95)
///     .with_learning_rate(LearningRate::constant(0.1))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Probability of taking the best-ranked move instead of a random one
    pub greedy: f64,
    pub learning_rate: LearningRate,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            greedy: 0.9,
            learning_rate: LearningRate::default(),
            seed: None,
        }
    }
}

impl LearnerConfig {
    pub fn with_greedy(mut self, greedy: f64) -> Self {
        self.greedy = greedy;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: LearningRate) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Exploration probability, the complement of `greedy`
    pub fn explore(&self) -> f64 {
        1.0 - self.greedy
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.greedy) {
            return Err(invalid(format!(
                "greedy must be within [0, 1], got {}",
                self.greedy
            )));
        }
        let rate = &self.learning_rate;
        if !(rate.initial > 0.0 && rate.initial <= 1.0) {
            return Err(invalid(format!(
                "learning_rate.initial must be within (0, 1], got {}",
                rate.initial
            )));
        }
        if !(rate.decay_base > 0.0 && rate.decay_base <= 1.0) {
            return Err(invalid(format!(
                "learning_rate.decay_base must be within (0, 1], got {}",
                rate.decay_base
            )));
        }
        if rate.decay_window == 0 {
            return Err(invalid("learning_rate.decay_window must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
