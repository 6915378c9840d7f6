//! Win, draw and terminal predicates

use super::board::{BOARD_SIZE, Board, Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Stateless game rules
pub struct Rules;

impl Rules {
    /// Check if a player has three in a row
    pub fn win(board: &Board, player: Player) -> bool {
        Self::completes_line(board.cells(), player)
    }

    /// Full board with no winner
    pub fn draw(board: &Board) -> bool {
        board.is_full() && !Self::win(board, Player::O) && !Self::win(board, Player::X)
    }

    pub fn terminal(board: &Board) -> bool {
        Self::win(board, Player::O) || Self::win(board, Player::X) || Self::draw(board)
    }

    /// Get the winner if there is one
    pub fn winner(board: &Board) -> Option<Player> {
        if Self::win(board, Player::O) {
            Some(Player::O)
        } else if Self::win(board, Player::X) {
            Some(Player::X)
        } else {
            None
        }
    }

    /// Empty positions that would complete a line for the player
    pub fn winning_positions(board: &Board, player: Player) -> Vec<usize> {
        let target = player.to_cell();
        let mut positions: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| {
                let mut empty = None;
                for &idx in line {
                    match board.get(idx) {
                        Cell::Empty if empty.is_none() => empty = Some(idx),
                        c if c == target => {}
                        _ => return None,
                    }
                }
                empty
            })
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    fn completes_line(cells: &[Cell; BOARD_SIZE], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_win_horizontal() {
        let b = board("ooo xx. ...");
        assert!(Rules::win(&b, Player::O));
        assert!(!Rules::win(&b, Player::X));
        assert!(Rules::terminal(&b));
        assert_eq!(Rules::winner(&b), Some(Player::O));
    }

    #[test]
    fn test_win_vertical() {
        let b = board("ox. ox. .x.");
        assert!(Rules::win(&b, Player::X));
        assert!(!Rules::win(&b, Player::O));
    }

    #[test]
    fn test_win_diagonals() {
        assert!(Rules::win(&board("o.x .o. x.o"), Player::O));
        assert!(Rules::win(&board("o.x .x. x.o"), Player::X));
    }

    #[test]
    fn test_full_board_with_win_is_not_draw() {
        // o x o
        // x o x
        // x o o
        let b = board("oxo xox xoo");
        assert!(b.is_full());
        assert!(Rules::win(&b, Player::O));
        assert!(!Rules::draw(&b));
        assert!(Rules::terminal(&b));
    }

    #[test]
    fn test_draw() {
        // o x o
        // o x x
        // x o o
        let b = board("oxo oxx xoo");
        assert!(Rules::draw(&b));
        assert!(Rules::terminal(&b));
        assert_eq!(Rules::winner(&b), None);
    }

    #[test]
    fn test_open_board_is_not_terminal() {
        let b = board("ox. ... ...");
        assert!(!Rules::terminal(&b));
        assert!(!Rules::draw(&b));
    }

    #[test]
    fn test_win_symmetric_under_relabeling() {
        for s in ["ooo xx. ...", "ox. ox. .x.", "oxo oxx xoo", "o.x .o. x.o", "........."] {
            let b = board(s);
            let swapped = b.swap_players();
            assert_eq!(Rules::win(&b, Player::O), Rules::win(&swapped, Player::X));
            assert_eq!(Rules::win(&b, Player::X), Rules::win(&swapped, Player::O));
        }
    }

    #[test]
    fn test_winning_positions() {
        // o o .
        // o . .
        // . . .
        let b = board("oo. o.. ...");
        assert_eq!(Rules::winning_positions(&b, Player::O), vec![2, 6]);
        assert!(Rules::winning_positions(&b, Player::X).is_empty());
    }
}
