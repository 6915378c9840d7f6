//! Noughts and crosses board, rules and turn sequencing

pub mod board;
pub mod game;
pub mod key;
pub mod rules;

pub use board::{BOARD_SIZE, Board, Cell, Player};
pub use game::{Game, GameOutcome, Move};
pub use key::StateKey;
pub use rules::{Rules, WINNING_LINES};
