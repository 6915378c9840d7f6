//! Turn sequencing over a shared board

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};
use crate::{Error, Result, ports::Agent};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub player: Player,
    pub position: usize,
}

impl Move {
    pub fn new(player: Player, position: usize) -> Self {
        Self { player, position }
    }

    pub fn row(&self) -> usize {
        self.position / 3
    }

    pub fn col(&self) -> usize {
        self.position % 3
    }
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal board, `None` while the game is still open
    pub fn from_board(board: &Board) -> Option<Self> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Win(winner))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Winning player id, 0 for a draw
    pub fn winner_id(self) -> u8 {
        match self {
            GameOutcome::Win(player) => player.id(),
            GameOutcome::Draw => 0,
        }
    }

    /// +1 for a win, -1 for a loss, 0 for a draw from `player`'s side
    pub fn reward_for(self, player: Player) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == player => 1.0,
            GameOutcome::Win(_) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }

    /// Swap the winner perspective (O ↔ X)
    pub fn swap_players(self) -> Self {
        match self {
            GameOutcome::Win(player) => GameOutcome::Win(player.opponent()),
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }
}

/// A game in progress between borrowed agents.
///
/// The game owns the live board. Agents only ever see it by shared
/// reference and answer with a [`Move`] that the game applies.
pub struct Game<'a> {
    start: Board,
    board: Board,
    agents: Vec<&'a mut dyn Agent>,
    current: usize,
    moves: Vec<Move>,
}

impl<'a> Game<'a> {
    /// Create a game on an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless exactly two agents are
    /// given, the first playing O and the second X.
    pub fn new(agents: Vec<&'a mut dyn Agent>) -> Result<Self> {
        if agents.len() != 2 {
            return Err(Error::InvalidConfiguration {
                message: format!("a game needs exactly 2 agents, got {}", agents.len()),
            });
        }
        for (index, expected) in [Player::O, Player::X].into_iter().enumerate() {
            let actual = agents[index].player();
            if actual != expected {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "agent '{}' in seat {} plays {actual:?}, expected {expected:?}",
                        agents[index].name(),
                        index + 1
                    ),
                });
            }
        }

        Ok(Self {
            start: Board::new(),
            board: Board::new(),
            agents,
            current: 0,
            moves: Vec::new(),
        })
    }

    /// Start from the given position instead of the empty board.
    ///
    /// The mover is inferred from the number of marks. [`Game::reset`]
    /// returns to this position.
    pub fn with_board(mut self, board: Board) -> Self {
        self.start = board;
        self.reset();
        self
    }

    /// Restore the starting position and clear the move list
    pub fn reset(&mut self) {
        self.board = self.start;
        self.current = Self::seat_of(self.board.to_move());
        self.moves.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves applied since the last reset
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Player whose turn it is
    pub fn current(&self) -> Player {
        self.agents[self.current].player()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agent(&self, index: usize) -> Option<&(dyn Agent + 'a)> {
        self.agents.get(index).map(|agent| &**agent)
    }

    pub fn agent_mut(&mut self, index: usize) -> Option<&mut (dyn Agent + 'a)> {
        match self.agents.get_mut(index) {
            Some(agent) => Some(&mut **agent),
            None => None,
        }
    }

    /// Ask the current mover for a move and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] on a finished game, [`Error::InvalidMove`]
    /// if the agent answers for the wrong player or targets an occupied cell,
    /// and propagates any error raised by the agent itself.
    pub fn next(&mut self) -> Result<Move> {
        if self.finished() {
            return Err(Error::GameOver);
        }

        let agent = &mut *self.agents[self.current];
        let expected = agent.player();
        let mv = agent.play(&self.board)?;
        if mv.player != expected {
            return Err(Error::InvalidMove {
                position: mv.position,
            });
        }

        self.board.receive(mv)?;
        self.moves.push(mv);
        self.current = (self.current + 1) % self.agents.len();
        Ok(mv)
    }

    pub fn finished(&self) -> bool {
        self.board.is_terminal()
    }

    /// Final outcome of the game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinished`] while the game is still open.
    pub fn result(&self) -> Result<GameOutcome> {
        GameOutcome::from_board(&self.board).ok_or(Error::NotFinished)
    }

    /// Run every agent's episode-start hook
    pub fn initialize_agents(&mut self) -> Result<()> {
        for agent in &mut self.agents {
            agent.initialize()?;
        }
        Ok(())
    }

    /// Run every agent's episode-end hook with the final board
    pub fn finalize_agents(&mut self, outcome: GameOutcome) -> Result<()> {
        let board = self.board;
        for agent in &mut self.agents {
            agent.finalize(outcome, &board)?;
        }
        Ok(())
    }

    fn seat_of(player: Player) -> usize {
        match player {
            Player::O => 0,
            Player::X => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::FixedOrderAgent;

    #[test]
    fn test_fixed_order_game_plays_to_completion() {
        let mut first = FixedOrderAgent::new(Player::O);
        let mut second = FixedOrderAgent::new(Player::X);
        let mut game = Game::new(vec![&mut first, &mut second]).unwrap();

        assert!(matches!(game.result(), Err(Error::NotFinished)));
        while !game.finished() {
            game.next().unwrap();
        }

        // o x o
        // x o x
        // o . .
        assert_eq!(game.moves().len(), 7);
        assert_eq!(game.result().unwrap(), GameOutcome::Win(Player::O));
        assert_eq!(game.result().unwrap().winner_id(), 1);
        assert!(matches!(game.next(), Err(Error::GameOver)));
    }

    #[test]
    fn test_mover_alternates() {
        let mut first = FixedOrderAgent::new(Player::O);
        let mut second = FixedOrderAgent::new(Player::X);
        let mut game = Game::new(vec![&mut first, &mut second]).unwrap();

        assert_eq!(game.current(), Player::O);
        assert_eq!(game.next().unwrap(), Move::new(Player::O, 0));
        assert_eq!(game.current(), Player::X);
        assert_eq!(game.next().unwrap(), Move::new(Player::X, 1));
        assert_eq!(game.board().depth(), 2);
    }

    #[test]
    fn test_rejects_misordered_seats() {
        let mut first = FixedOrderAgent::new(Player::X);
        let mut second = FixedOrderAgent::new(Player::O);
        let result = Game::new(vec![&mut first, &mut second]);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_with_board_and_reset() {
        let mut first = FixedOrderAgent::new(Player::O);
        let mut second = FixedOrderAgent::new(Player::X);
        let start = Board::from_string("o........").unwrap();
        let mut game = Game::new(vec![&mut first, &mut second])
            .unwrap()
            .with_board(start);

        assert_eq!(game.current(), Player::X);
        game.next().unwrap();
        game.reset();
        assert_eq!(*game.board(), start);
        assert!(game.moves().is_empty());
    }

    #[test]
    fn test_outcome_rewards() {
        let win = GameOutcome::Win(Player::O);
        assert_eq!(win.reward_for(Player::O), 1.0);
        assert_eq!(win.reward_for(Player::X), -1.0);
        assert_eq!(GameOutcome::Draw.reward_for(Player::X), 0.0);
        assert_eq!(win.swap_players(), GameOutcome::Win(Player::X));
    }

    #[test]
    fn test_move_coordinates() {
        let mv = Move::new(Player::O, 7);
        assert_eq!((mv.row(), mv.col()), (2, 1));
    }
}
