//! Episode processor: drives games, tallies outcomes, notifies observers

use std::{collections::VecDeque, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{Game, GameOutcome, Player},
};

/// Processor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Episodes per reporting window
    pub window: usize,

    /// Random seed; agent `i` is seeded with `seed + i` when the first run starts
    pub seed: Option<u64>,

    /// Player whose results are counted as wins and losses
    pub tracked: Player,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            window: 1000,
            seed: None,
            tracked: Player::O,
        }
    }
}

impl ProcessorConfig {
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tracked(mut self, tracked: Player) -> Self {
        self.tracked = tracked;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::InvalidConfiguration {
                message: "window must be at least 1 episode".to_string(),
            });
        }
        Ok(())
    }
}

/// Win/draw/loss counts from one player's side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: GameOutcome, tracked: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == tracked => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    fn forget(&mut self, outcome: GameOutcome, tracked: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == tracked => self.wins -= 1,
            GameOutcome::Win(_) => self.losses -= 1,
            GameOutcome::Draw => self.draws -= 1,
        }
    }

    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins, self.total())
    }

    pub fn draw_rate(&self) -> f64 {
        ratio(self.draws, self.total())
    }

    pub fn loss_rate(&self) -> f64 {
        ratio(self.losses, self.total())
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Counts over the most recent `capacity` outcomes
#[derive(Debug, Clone)]
pub struct RollingTally {
    capacity: usize,
    tracked: Player,
    recent: VecDeque<GameOutcome>,
    tally: Tally,
}

impl RollingTally {
    pub fn new(capacity: usize, tracked: Player) -> Self {
        Self {
            capacity,
            tracked,
            recent: VecDeque::with_capacity(capacity),
            tally: Tally::default(),
        }
    }

    pub fn push(&mut self, outcome: GameOutcome) {
        if self.recent.len() == self.capacity
            && let Some(oldest) = self.recent.pop_front()
        {
            self.tally.forget(oldest, self.tracked);
        }
        self.recent.push_back(outcome);
        self.tally.record(outcome, self.tracked);
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }
}

/// Results of one complete, non-overlapping window of episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowReport {
    /// Zero-based window number
    pub index: usize,
    pub first_episode: usize,
    pub last_episode: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl WindowReport {
    fn new(index: usize, first_episode: usize, tally: Tally) -> Self {
        Self {
            index,
            first_episode,
            last_episode: first_episode + tally.total() - 1,
            wins: tally.wins,
            draws: tally.draws,
            losses: tally.losses,
            win_rate: tally.win_rate(),
            draw_rate: tally.draw_rate(),
            loss_rate: tally.loss_rate(),
        }
    }
}

/// Snapshot handed to the stop predicate between episodes
#[derive(Debug, Clone)]
pub struct Progress {
    /// Episodes completed by this processor
    pub episodes: usize,
    pub totals: Tally,
    /// Counts over the most recent window-sized run of episodes
    pub rolling: Tally,
    pub last_outcome: Option<GameOutcome>,
    pub last_window: Option<WindowReport>,
}

/// Summary of everything a processor has played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorReport {
    pub episodes: usize,
    pub tracked: Player,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub windows: Vec<WindowReport>,
}

impl ProcessorReport {
    /// Save report to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}

/// Runs episodes of a [`Game`] and reports on them.
///
/// One episode is: reset, initialize hooks, moves until the board is
/// terminal, result, finalize hooks, tally, observers. Counts accumulate
/// across calls, so a processor can drive several runs back to back.
///
/// With a seed configured, agents are seeded once, at the start of the
/// first run. Later runs continue the same random streams, so splitting a
/// run into chunks plays the same games as one long run.
pub struct Processor {
    config: ProcessorConfig,
    observers: Vec<Box<dyn Observer>>,
    episodes: usize,
    totals: Tally,
    rolling: RollingTally,
    window_start: usize,
    last_outcome: Option<GameOutcome>,
    windows: Vec<WindowReport>,
    seeded: bool,
}

impl Processor {
    /// Create a processor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the window is empty.
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rolling: RollingTally::new(config.window, config.tracked),
            config,
            observers: Vec::new(),
            episodes: 0,
            totals: Tally::default(),
            window_start: 0,
            last_outcome: None,
            windows: Vec::new(),
            seeded: false,
        })
    }

    /// Add an observer to the processor
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn windows(&self) -> &[WindowReport] {
        &self.windows
    }

    pub fn progress(&self) -> Progress {
        Progress {
            episodes: self.episodes,
            totals: self.totals,
            rolling: self.rolling.tally(),
            last_outcome: self.last_outcome,
            last_window: self.windows.last().cloned(),
        }
    }

    pub fn report(&self) -> ProcessorReport {
        ProcessorReport {
            episodes: self.episodes,
            tracked: self.config.tracked,
            wins: self.totals.wins,
            draws: self.totals.draws,
            losses: self.totals.losses,
            win_rate: self.totals.win_rate(),
            draw_rate: self.totals.draw_rate(),
            loss_rate: self.totals.loss_rate(),
            windows: self.windows.clone(),
        }
    }

    /// Play one episode from the game's starting position
    pub fn run_episode(&mut self, game: &mut Game<'_>) -> Result<GameOutcome> {
        let episode = self.episodes;
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        game.reset();
        game.initialize_agents()?;

        let mut step = 0;
        while !game.finished() {
            let before = *game.board();
            let mv = game.next()?;
            for observer in &mut self.observers {
                observer.on_move(episode, step, &before, mv)?;
            }
            step += 1;
        }

        let outcome = game.result()?;
        game.finalize_agents(outcome)?;
        log::debug!("episode {episode} ended in {step} moves: {outcome:?}");

        let completed = self.record(outcome);
        for observer in &mut self.observers {
            observer.on_episode_end(episode, outcome)?;
        }
        if let Some(report) = completed {
            for observer in &mut self.observers {
                observer.on_window(&report)?;
            }
            self.windows.push(report);
        }
        Ok(outcome)
    }

    /// Play episodes until `stop` returns true.
    ///
    /// The predicate is checked before every episode, so a predicate that
    /// is already satisfied plays nothing.
    pub fn run_until<F>(&mut self, game: &mut Game<'_>, stop: F) -> Result<ProcessorReport>
    where
        F: FnMut(&Progress) -> bool,
    {
        self.drive(game, None, stop)
    }

    /// Play exactly `episodes` more episodes
    pub fn run(&mut self, game: &mut Game<'_>, episodes: usize) -> Result<ProcessorReport> {
        let target = self.episodes + episodes;
        self.drive(game, Some(episodes), |progress| progress.episodes >= target)
    }

    fn drive<F>(
        &mut self,
        game: &mut Game<'_>,
        planned: Option<usize>,
        mut stop: F,
    ) -> Result<ProcessorReport>
    where
        F: FnMut(&Progress) -> bool,
    {
        self.seed_agents(game)?;
        for observer in &mut self.observers {
            observer.on_run_start(planned)?;
        }

        let started = self.episodes;
        while !stop(&self.progress()) {
            self.run_episode(game)?;
        }

        for observer in &mut self.observers {
            observer.on_run_end(self.episodes - started)?;
        }
        Ok(self.report())
    }

    fn seed_agents(&mut self, game: &mut Game<'_>) -> Result<()> {
        if self.seeded {
            return Ok(());
        }
        if let Some(seed) = self.config.seed {
            for index in 0..game.agent_count() {
                if let Some(agent) = game.agent_mut(index) {
                    agent.set_rng_seed(seed.wrapping_add(index as u64))?;
                }
            }
            self.seeded = true;
        }
        Ok(())
    }

    fn record(&mut self, outcome: GameOutcome) -> Option<WindowReport> {
        self.episodes += 1;
        self.last_outcome = Some(outcome);
        self.totals.record(outcome, self.config.tracked);
        self.rolling.push(outcome);

        if self.episodes - self.window_start < self.config.window {
            return None;
        }
        let report = WindowReport::new(self.windows.len(), self.window_start, self.rolling.tally());
        self.window_start = self.episodes;
        Some(report)
    }
}
