//! Exhaustive minimax over every reachable position

use std::collections::HashSet;

use crate::{
    tictactoe::{BOARD_SIZE, Board, GameOutcome, Player, StateKey},
    value_table::ValueTable,
};

/// Full-width depth-first solver.
///
/// Values are from player O's side: +1 means O wins with best play, -1 means
/// X wins, 0 is a draw. Every position reachable from the empty board under
/// alternating play gets an entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Compute the exact value of every reachable state
    pub fn solve(&self) -> ValueTable {
        let mut memo = ValueTable::new();
        let mut board = Board::new();
        let root = Self::search(&mut board, 0, &mut memo);
        log::info!("solved {} states, root value {root}", memo.len());
        memo
    }

    /// Exact value of a single position, O to move on even depth.
    ///
    /// Uses a private memo, so repeated calls do not share work.
    pub fn value_of(&self, board: &Board) -> f64 {
        let mut memo = ValueTable::new();
        let mut working = *board;
        Self::search(&mut working, board.depth(), &mut memo)
    }

    /// Visit every state reachable from the empty board exactly once.
    ///
    /// Terminal states are visited but not expanded.
    pub fn reachable<F: FnMut(&Board)>(mut visit: F) {
        let mut seen = HashSet::new();
        let mut board = Board::new();
        Self::walk(&mut board, 0, &mut seen, &mut visit);
    }

    fn search(board: &mut Board, depth: usize, memo: &mut ValueTable) -> f64 {
        let key = board.key();
        if let Some(value) = memo.lookup(&key) {
            return value;
        }

        if let Some(outcome) = GameOutcome::from_board(board) {
            let value = outcome.reward_for(Player::O);
            memo.insert(key, value);
            return value;
        }

        let mover = Player::for_depth(depth);
        let mut best = match mover {
            Player::O => f64::NEG_INFINITY,
            Player::X => f64::INFINITY,
        };

        for pos in 0..BOARD_SIZE {
            if !board.is_empty(pos) {
                continue;
            }
            board.place(pos, mover);
            let child = Self::search(board, depth + 1, memo);
            board.clear(pos);

            best = match mover {
                Player::O => best.max(child),
                Player::X => best.min(child),
            };
        }

        memo.insert(key, best);
        best
    }

    fn walk<F: FnMut(&Board)>(
        board: &mut Board,
        depth: usize,
        seen: &mut HashSet<StateKey>,
        visit: &mut F,
    ) {
        if !seen.insert(board.key()) {
            return;
        }
        visit(board);
        if board.is_terminal() {
            return;
        }

        let mover = Player::for_depth(depth);
        for pos in 0..BOARD_SIZE {
            if board.is_empty(pos) {
                board.place(pos, mover);
                Self::walk(board, depth + 1, seen, visit);
                board.clear(pos);
            }
        }
    }
}
