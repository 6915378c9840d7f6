//! State keys used for value lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BOARD_SIZE, Board};

/// Order-preserving encoding of a board's nine cells.
///
/// Rotations and reflections of a position produce distinct keys; the value
/// tables are defined over the unreduced state space.
///
/// # Example
///
/// ```
/// use noughts::tictactoe::{Board, StateKey};
///
/// let board = Board::from_string("o...x....").unwrap();
/// assert_eq!(board.key().as_str(), "o...x....");
///
/// let parsed = StateKey::parse("o...x....").unwrap();
/// assert_eq!(parsed, board.key());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a key from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not exactly nine valid cells.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        if s.chars().count() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: s.chars().count(),
                context: s.to_string(),
            });
        }
        let board = Board::from_string(s)?;
        Ok(Self::from(&board))
    }

    /// Rebuild the board this key encodes
    pub fn to_board(&self) -> Board {
        // Keys are only constructed from boards or validated strings
        Board::from_string(&self.0).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        StateKey(board.cells().iter().map(|c| c.to_char()).collect())
    }
}

impl TryFrom<String> for StateKey {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
