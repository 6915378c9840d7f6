//! Observer port - reporting boundary of the episode processor
//!
//! Observers receive episode outcomes and rolling-window statistics without
//! the processor knowing how they are displayed or stored.

use crate::{
    Result,
    pipeline::WindowReport,
    tictactoe::{Board, GameOutcome, Move},
};

/// Observer trait for monitoring a batch of episodes
///
/// # Event Sequence
///
/// 1. `on_run_start(planned)` - once; `planned` is `None` for open-ended runs
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_move(...)` for each move
///    - `on_episode_end(episode, outcome)`
///    - `on_window(report)` whenever a full window has been played
/// 3. `on_run_end(episodes)` - once
///
/// # Examples
///
/// ```no_run
/// use noughts::{ports::Observer, tictactoe::GameOutcome};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_episode_end(&mut self, _episode: usize, outcome: GameOutcome) -> noughts::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    fn on_run_start(&mut self, _planned: Option<usize>) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step` - Move number within the episode (0-based)
    /// * `before` - Board the mover was shown
    /// * `mv` - Move that was applied
    fn on_move(&mut self, _episode: usize, _step: usize, _before: &Board, _mv: Move) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called every time a full window of episodes completes
    fn on_window(&mut self, _report: &WindowReport) -> Result<()> {
        Ok(())
    }

    fn on_run_end(&mut self, _episodes: usize) -> Result<()> {
        Ok(())
    }
}
