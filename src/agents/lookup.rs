//! Agents that read a solved value table

use std::sync::Arc;

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use super::baseline::RandomAgent;
use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{BOARD_SIZE, Board, Move, Player},
    value_table::ValueTable,
};

/// Optimal play from a precomputed solver table.
///
/// Every empty cell is scored by the table value of the board after
/// placing there. The agent takes the maximum when `first` is set and the
/// minimum otherwise, breaking ties uniformly at random.
pub struct LookupAgent {
    player: Player,
    name: String,
    table: Arc<ValueTable>,
    first: bool,
    rng: StdRng,
}

impl LookupAgent {
    /// Create a lookup agent; `first` defaults to `player == Player::O`
    pub fn new(player: Player, table: Arc<ValueTable>) -> Self {
        Self {
            player,
            name: format!("Lookup-{player}"),
            table,
            first: player == Player::O,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Override the selection direction: `true` maximizes, `false` minimizes
    pub fn with_first(mut self, first: bool) -> Self {
        self.first = first;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Table value after playing each empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if an afterstate is missing from the table.
    pub fn evaluate(&self, board: &Board) -> Result<Vec<(usize, f64)>> {
        board
            .empty_positions()
            .into_iter()
            .map(|pos| {
                let value = self.table.get(&board.with_mark(pos, self.player))?;
                Ok((pos, value))
            })
            .collect()
    }

    /// All moves sharing the extremal value
    pub fn best_positions(&self, board: &Board) -> Result<Vec<usize>> {
        let scored = self.evaluate(board)?;
        let target = if self.first {
            scored.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max)
        } else {
            scored.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min)
        };
        Ok(scored
            .into_iter()
            .filter(|&(_, v)| v == target)
            .map(|(pos, _)| pos)
            .collect())
    }
}

impl Agent for LookupAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &Board) -> Result<Move> {
        let best = self.best_positions(board)?;
        best.choose(&mut self.rng)
            .map(|&pos| Move::new(self.player, pos))
            .ok_or(Error::NoMovesLeft {
                player: self.player,
            })
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Deliberately fallible opponent.
///
/// Plays like [`LookupAgent`] until the trigger cell holds the opponent's
/// mark, then falls back to uniform random moves.
pub struct BlendedAgent {
    name: String,
    trigger: usize,
    lookup: LookupAgent,
    random: RandomAgent,
}

impl BlendedAgent {
    /// Create a blended agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if `trigger` is outside 0-8.
    pub fn new(player: Player, table: Arc<ValueTable>, trigger: usize) -> Result<Self> {
        if trigger >= BOARD_SIZE {
            return Err(Error::InvalidPosition { position: trigger });
        }
        Ok(Self {
            name: format!("Blended-{player}@{trigger}"),
            trigger,
            lookup: LookupAgent::new(player, table),
            random: RandomAgent::new(player),
        })
    }

    pub fn trigger(&self) -> usize {
        self.trigger
    }

    fn triggered(&self, board: &Board) -> bool {
        board.get(self.trigger) == self.lookup.player().opponent().to_cell()
    }
}

impl Agent for BlendedAgent {
    fn player(&self) -> Player {
        self.lookup.player()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &Board) -> Result<Move> {
        if self.triggered(board) {
            log::trace!("{}: trigger cell {} taken, playing randomly", self.name, self.trigger);
            self.random.play(board)
        } else {
            self.lookup.play(board)
        }
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.lookup.set_rng_seed(seed)?;
        self.random.set_rng_seed(seed.wrapping_add(1))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Solver;

    fn solved() -> Arc<ValueTable> {
        Arc::new(Solver::new().solve())
    }

    #[test]
    fn test_lookup_takes_immediate_win() {
        let table = solved();
        // o o .
        // x x .
        // . . .
        let board = Board::from_string("oo. xx. ...").unwrap();
        let mut agent = LookupAgent::new(Player::O, table).with_seed(3);
        assert_eq!(agent.play(&board).unwrap(), Move::new(Player::O, 2));
    }

    #[test]
    fn test_lookup_minimizer_blocks() {
        let table = solved();
        // o o .
        // . x .
        // . . .
        let board = Board::from_string("oo. .x. ...").unwrap();
        let mut agent = LookupAgent::new(Player::X, table).with_seed(5);
        assert_eq!(agent.play(&board).unwrap(), Move::new(Player::X, 2));
    }

    #[test]
    fn test_lookup_breaks_ties_randomly() {
        let table = solved();
        let agent = LookupAgent::new(Player::O, Arc::clone(&table));
        // Every opening move draws with best play
        assert_eq!(agent.best_positions(&Board::new()).unwrap().len(), 9);

        let mut seen = std::collections::HashSet::new();
        let mut agent = LookupAgent::new(Player::O, table).with_seed(11);
        for _ in 0..100 {
            seen.insert(agent.play(&Board::new()).unwrap().position);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_lookup_unknown_state() {
        let mut agent = LookupAgent::new(Player::O, Arc::new(ValueTable::new()));
        assert!(matches!(
            agent.play(&Board::new()),
            Err(Error::UnknownState { .. })
        ));
    }

    #[test]
    fn test_blended_switches_on_trigger() {
        let table = solved();
        let mut agent = BlendedAgent::new(Player::X, table, 4).unwrap();
        agent.set_rng_seed(17).unwrap();

        // O holds the trigger cell: random moves, all of them legal
        let board = Board::from_string("o.. .o. x..").unwrap();
        assert!(agent.triggered(&board));
        for _ in 0..20 {
            let mv = agent.play(&board).unwrap();
            assert!(board.is_empty(mv.position));
        }

        let board = Board::from_string("oo. .x. ...").unwrap();
        assert!(!agent.triggered(&board));
        assert_eq!(agent.play(&board).unwrap(), Move::new(Player::X, 2));
    }

    #[test]
    fn test_blended_rejects_bad_trigger() {
        assert!(BlendedAgent::new(Player::O, solved(), 9).is_err());
    }
}
