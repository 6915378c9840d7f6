//! Baseline agents that need no table: fixed-order and uniform random play

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::Agent,
    tictactoe::{Board, Move, Player},
};

/// Plays the first empty cell in row-major order
pub struct FixedOrderAgent {
    player: Player,
    name: String,
}

impl FixedOrderAgent {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            name: format!("FixedOrder-{player}"),
        }
    }
}

impl Agent for FixedOrderAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &Board) -> Result<Move> {
        (0..9)
            .find(|&pos| board.is_empty(pos))
            .map(|pos| Move::new(self.player, pos))
            .ok_or(Error::NoMovesLeft {
                player: self.player,
            })
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Random policy agent (baseline)
pub struct RandomAgent {
    player: Player,
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(player: Player) -> Self {
        Self {
            player,
            name: format!("Random-{player}"),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(player: Player, seed: u64) -> Self {
        Self {
            player,
            name: format!("Random-{player}"),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &Board) -> Result<Move> {
        let moves = board.empty_positions();
        moves
            .choose(&mut self.rng)
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
