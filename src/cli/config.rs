//! Shared configuration types for CLI commands

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    td::{LearnerConfig, LearningRate},
    tictactoe::Player,
};

/// Every agent the CLI can seat at the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Moves typed on the terminal
    Human,
    /// First empty cell in row-major order
    Fixed,
    /// Uniform random empty cell
    Random,
    /// Optimal play from the solved table
    Lookup,
    /// Optimal until the trigger cell is taken, then random
    Blended,
    /// Temporal-difference learner
    Learner,
}

pub(crate) fn parse_player(value: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "o" | "1" | "first" => Ok(Player::O),
        "x" | "2" | "second" => Ok(Player::X),
        other => Err(anyhow!("Invalid player '{other}' (expected 'o' or 'x')")),
    }
}

/// Learner settings named in a config file or on the command line.
///
/// Unset fields keep the defaults for a fresh learner and the saved values
/// for a resumed one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerOverrides {
    pub greedy: Option<f64>,
    pub learning_rate: Option<LearningRate>,
    pub seed: Option<u64>,
}

impl LearnerOverrides {
    pub fn apply(&self, mut config: LearnerConfig) -> LearnerConfig {
        if let Some(greedy) = self.greedy {
            config.greedy = greedy;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
    }
}

/// Training configuration, loadable from JSON and overridden by flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Episodes per reporting window
    pub window: usize,

    pub opponent: AgentKind,

    /// Which mark the learner places
    pub player: Player,

    /// Trigger cell for a blended opponent
    pub trigger: usize,

    pub learner: LearnerOverrides,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            window: 1000,
            opponent: AgentKind::Random,
            player: Player::O,
            trigger: 4,
            learner: LearnerOverrides::default(),
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open config: {}", path.as_ref().display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))
    }
}
