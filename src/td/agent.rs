//! Temporal-difference afterstate learner
//!
//! The agent scores each legal move by the learned value of the board it
//! would produce, plays near-greedily, and after the episode pulls every
//! visited afterstate toward its successor, newest first.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::config::LearnerConfig;
use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, GameOutcome, Move, Player},
    value_table::ValueTable,
};

/// Where the learner is in its episode cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LearnerState {
    pub player: Player,
    pub config: LearnerConfig,
    pub rounds: u64,
    pub values: ValueTable,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// TD(0) learner over afterstate values.
///
/// Values are stored from this agent's own side: +1 is a won terminal
/// board, -1 a lost one.
#[derive(Debug, Clone)]
pub struct LearningAgent {
    player: Player,
    name: String,
    config: LearnerConfig,
    values: ValueTable,
    history: Vec<Board>,
    rounds: u64,
    phase: Phase,
    rng: StdRng,
}

impl LearningAgent {
    /// Create a learner with a freshly seeded table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate.
    pub fn new(player: Player, config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(LearnerState {
            player,
            values: ValueTable::seeded(player),
            config,
            rounds: 0,
        }))
    }

    fn assemble(state: LearnerState) -> Self {
        Self {
            player: state.player,
            name: format!("Learner-{}", state.player),
            rng: build_rng(state.config.seed),
            config: state.config,
            values: state.values,
            history: Vec::new(),
            rounds: state.rounds,
            phase: Phase::Idle,
        }
    }

    pub(crate) fn export_state(&self) -> LearnerState {
        LearnerState {
            player: self.player,
            config: self.config.clone(),
            rounds: self.rounds,
            values: self.values.clone(),
        }
    }

    pub(crate) fn from_state(state: LearnerState) -> Result<Self> {
        state.config.validate()?;
        Ok(Self::assemble(state))
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn into_values(self) -> ValueTable {
        self.values
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Completed episodes
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Afterstates recorded so far in the current episode
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Step size the next update will use
    pub fn current_rate(&self) -> f64 {
        self.config.learning_rate.at(self.rounds)
    }

    /// Replace the configuration, keeping learned values and the round count.
    ///
    /// The random stream is rebuilt only when the seed changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate.
    pub fn with_config(mut self, config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        if config.seed != self.config.seed {
            self.rng = build_rng(config.seed);
        }
        self.config = config;
        Ok(self)
    }

    /// Stop exploring, for evaluation runs
    pub fn greedy_policy(mut self) -> Self {
        self.config.greedy = 1.0;
        self
    }

    /// Afterstate value of every legal move, best first.
    ///
    /// Ties keep row-major order.
    pub fn rank(&self, board: &Board) -> Result<Vec<(usize, f64)>> {
        let mut scratch = *board;
        let mut ranked = Vec::new();
        for pos in board.empty_positions() {
            scratch.place(pos, self.player);
            let value = self.values.get(&scratch);
            scratch.clear(pos);
            ranked.push((pos, value?));
        }
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(ranked)
    }

    fn begin(&mut self) {
        self.history.clear();
        self.phase = Phase::Playing;
    }

    fn backup(&mut self, outcome: GameOutcome) -> Result<()> {
        let alpha = self.current_rate();
        let terminal = self.history.len() - 1;
        self.values
            .set(&self.history[terminal], outcome.reward_for(self.player));

        for newer in (1..=terminal).rev() {
            let older = newer - 1;
            let target = self.values.get(&self.history[newer])?;
            let current = self.values.get(&self.history[older])?;
            self.values
                .set(&self.history[older], current + alpha * (target - current));
        }
        Ok(())
    }
}

impl Agent for LearningAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> Result<()> {
        self.begin();
        Ok(())
    }

    fn play(&mut self, board: &Board) -> Result<Move> {
        if self.phase == Phase::Idle {
            self.begin();
        }

        let ranked = self.rank(board)?;
        if ranked.is_empty() {
            return Err(Error::NoMovesLeft {
                player: self.player,
            });
        }

        let pos = if self.rng.random::<f64>() < self.config.greedy {
            ranked[0].0
        } else {
            ranked[self.rng.random_range(0..ranked.len())].0
        };

        self.history.push(board.with_mark(pos, self.player));
        Ok(Move::new(self.player, pos))
    }

    fn finalize(&mut self, outcome: GameOutcome, board: &Board) -> Result<()> {
        if self.history.is_empty() {
            self.phase = Phase::Idle;
            return Err(Error::EmptyHistory);
        }
        if self.history.last() != Some(board) {
            self.history.push(*board);
        }

        let result = self.backup(outcome);
        self.rounds += 1;
        self.history.clear();
        self.phase = Phase::Idle;
        log::trace!(
            "{} finished round {} with {:?}, next rate {:.4}",
            self.name,
            self.rounds,
            outcome,
            self.current_rate()
        );
        result
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.config.seed = Some(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
