//! State-value table shared by the solver and the learner

use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    solver::Solver,
    tictactoe::{Board, GameOutcome, Player, StateKey},
};

/// Value table mapping state keys to scalar values
///
/// Keys are kept ordered so that iteration and serialization are
/// deterministic. The solver stores exact values in {-1, 0, 1} from player
/// O's side; a learner stores estimates in [-1, 1] from its own side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: BTreeMap<StateKey, f64>,
}

impl ValueTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every reachable state for a learner playing `perspective`.
    ///
    /// Terminal states hold their outcome (+1 win, -1 loss, 0 draw) and all
    /// other states start at 0. No minimax is applied.
    pub fn seeded(perspective: Player) -> Self {
        let mut table = Self::new();
        Solver::reachable(|board| {
            let value = GameOutcome::from_board(board)
                .map(|outcome| outcome.reward_for(perspective))
                .unwrap_or(0.0);
            table.values.insert(board.key(), value);
        });
        table
    }

    /// Get the value stored for a board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the board was never stored.
    pub fn get(&self, board: &Board) -> Result<f64> {
        self.get_key(&board.key())
    }

    /// Get the value stored under a key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the key was never stored.
    pub fn get_key(&self, key: &StateKey) -> Result<f64> {
        self.lookup(key).ok_or_else(|| Error::UnknownState {
            key: key.to_string(),
        })
    }

    /// Set the value for a board
    pub fn set(&mut self, board: &Board, value: f64) {
        self.values.insert(board.key(), value);
    }

    pub(crate) fn lookup(&self, key: &StateKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: StateKey, value: f64) {
        self.values.insert(key, value);
    }

    pub fn contains(&self, board: &Board) -> bool {
        self.values.contains_key(&board.key())
    }

    /// Get total number of states stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, StateKey, f64> {
        self.values.iter()
    }

    /// Smallest and largest stored value
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values.values().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl<'a> IntoIterator for &'a ValueTable {
    type Item = (&'a StateKey, &'a f64);
    type IntoIter = btree_map::Iter<'a, StateKey, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
