//! Observer implementations for episode processing
//!
//! Observers allow composable reporting during a run without coupling the
//! processor to specific output formats.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::processor::{Tally, WindowReport};
use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{Board, GameOutcome, Move, Player},
};

/// Writes run milestones and window summaries through the `log` facade
pub struct LogObserver {
    tracked: Player,
}

impl LogObserver {
    pub fn new(tracked: Player) -> Self {
        Self { tracked }
    }
}

impl Observer for LogObserver {
    fn on_run_start(&mut self, planned: Option<usize>) -> Result<()> {
        match planned {
            Some(episodes) => log::info!("starting run of {episodes} episodes"),
            None => log::info!("starting open-ended run"),
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: GameOutcome) -> Result<()> {
        log::trace!("episode {episode}: {outcome:?} (winner id {})", outcome.winner_id());
        Ok(())
    }

    fn on_window(&mut self, report: &WindowReport) -> Result<()> {
        log::info!(
            "window {} (episodes {}-{}): {} win {:.3} draw {:.3} loss {:.3}",
            report.index,
            report.first_episode,
            report.last_episode,
            self.tracked,
            report.win_rate,
            report.draw_rate,
            report.loss_rate
        );
        Ok(())
    }

    fn on_run_end(&mut self, episodes: usize) -> Result<()> {
        log::info!("run finished after {episodes} episodes");
        Ok(())
    }
}

/// Progress bar observer - Shows run progress
///
/// Uses a bar when the episode count is known and a spinner otherwise.
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tracked: Player,
    tally: Tally,
}

impl ProgressObserver {
    pub fn new(tracked: Player) -> Self {
        Self {
            progress_bar: None,
            tracked,
            tally: Tally::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} D:{} L:{}",
            self.tally.wins, self.tally.draws, self.tally.losses
        )
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, planned: Option<usize>) -> Result<()> {
        let pb = match planned {
            Some(total) => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})",
                        )
                        .map_err(|e| Error::ProgressBarTemplate {
                            message: e.to_string(),
                        })?
                        .progress_chars("=>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} [{elapsed_precise}] {pos} episodes (W:{msg})")
                        .map_err(|e| Error::ProgressBarTemplate {
                            message: e.to_string(),
                        })?,
                );
                pb
            }
        };
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome, self.tracked);
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self, _episodes: usize) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Summary of collected metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
    pub windows: usize,
}

#[derive(Debug, Default)]
struct Metrics {
    tally: Tally,
    move_counts: Vec<usize>,
    windows: usize,
}

/// Metrics observer - Tracks totals in memory
///
/// The observer is moved into the processor; keep a [`MetricsHandle`] to
/// read the numbers afterwards.
pub struct MetricsObserver {
    tracked: Player,
    metrics: Arc<Mutex<Metrics>>,
}

/// Read side of a [`MetricsObserver`]
#[derive(Clone)]
pub struct MetricsHandle {
    metrics: Arc<Mutex<Metrics>>,
}

impl MetricsObserver {
    pub fn new(tracked: Player) -> Self {
        Self {
            tracked,
            metrics: Arc::new(Mutex::new(Metrics::default())),
        }
    }

    pub fn handle(&self) -> MetricsHandle {
        MetricsHandle {
            metrics: Arc::clone(&self.metrics),
        }
    }

    fn with_metrics<F: FnOnce(&mut Metrics)>(&self, update: F) {
        let mut metrics = self
            .metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        update(&mut metrics);
    }
}

impl MetricsHandle {
    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let metrics = self
            .metrics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let avg_game_length = if metrics.move_counts.is_empty() {
            0.0
        } else {
            metrics.move_counts.iter().sum::<usize>() as f64 / metrics.move_counts.len() as f64
        };
        MetricsSummary {
            total_games: metrics.tally.total(),
            wins: metrics.tally.wins,
            draws: metrics.tally.draws,
            losses: metrics.tally.losses,
            win_rate: metrics.tally.win_rate(),
            draw_rate: metrics.tally.draw_rate(),
            loss_rate: metrics.tally.loss_rate(),
            avg_game_length,
            windows: metrics.windows,
        }
    }
}

impl Observer for MetricsObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.with_metrics(|m| m.move_counts.push(0));
        Ok(())
    }

    fn on_move(&mut self, _episode: usize, _step: usize, _before: &Board, _mv: Move) -> Result<()> {
        self.with_metrics(|m| {
            if let Some(last) = m.move_counts.last_mut() {
                *last += 1;
            }
        });
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome) -> Result<()> {
        let tracked = self.tracked;
        self.with_metrics(|m| m.tally.record(outcome, tracked));
        Ok(())
    }

    fn on_window(&mut self, _report: &WindowReport) -> Result<()> {
        self.with_metrics(|m| m.windows += 1);
        Ok(())
    }
}
