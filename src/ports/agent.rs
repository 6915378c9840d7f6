//! Agent port - the uniform contract every decision policy implements
//!
//! Lookup tables, random play, fixed-order play, human input, blended
//! heuristics and the temporal-difference learner all sit behind this trait,
//! so a [`Game`](crate::tictactoe::Game) can sequence any pair of them.

use crate::{
    Result,
    tictactoe::{Board, GameOutcome, Move, Player},
};

/// Agent trait - choose a move given the current board
///
/// # Lifecycle
///
/// For every episode the processor calls:
/// 1. `initialize()` once, before the first move
/// 2. `play(board)` each time it is this agent's turn
/// 3. `finalize(outcome, board)` once, with the terminal board
///
/// # Examples
///
/// ```no_run
/// use noughts::{
///     Result,
///     ports::Agent,
///     tictactoe::{Board, Move, Player},
/// };
///
/// struct CenterFirst(Player);
///
/// impl Agent for CenterFirst {
///     fn player(&self) -> Player {
///         self.0
///     }
///
///     fn name(&self) -> &str {
///         "center-first"
///     }
///
///     fn play(&mut self, board: &Board) -> Result<Move> {
///         let position = if board.is_empty(4) {
///             4
///         } else {
///             board.empty_positions()[0]
///         };
///         Ok(Move::new(self.0, position))
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait Agent: Send {
    /// The mark this agent places
    fn player(&self) -> Player;

    /// Get the agent's name, used in logs and reports
    fn name(&self) -> &str;

    /// Select a move for the given board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoMovesLeft`] when the board is full.
    fn play(&mut self, board: &Board) -> Result<Move>;

    /// Called before the first move of an episode.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once the episode has reached a terminal board.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for agents that do not learn.
    fn finalize(&mut self, _outcome: GameOutcome, _board: &Board) -> Result<()> {
        Ok(())
    }

    /// Seed the agent's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing and returns `Ok(())`.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
