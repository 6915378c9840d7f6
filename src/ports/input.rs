//! Input port - where a human player's moves come from

use crate::{Result, tictactoe::Player};

/// Source of positions for a [`HumanAgent`](crate::agents::HumanAgent).
///
/// Implementations show `rendered` to a person however they like and return
/// the raw position they picked. Validation happens in the agent.
pub trait InputProvider: Send {
    /// Ask for a position on the rendered board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Input`] when no answer can be obtained
    /// (closed stream, aborted prompt). Unparsable answers are not errors;
    /// return them as `Ok(None)` so the agent can re-prompt.
    fn request_position(&mut self, rendered: &str, player: Player) -> Result<Option<usize>>;

    /// Tell the person why their last answer was rejected.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn reject(&mut self, _reason: &str) -> Result<()> {
        Ok(())
    }
}
