//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::Move, key::StateKey, rules::Rules};

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    O,
    X,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::O => 'o',
            Cell::X => 'x',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'o' | 'O' => Some(Cell::O),
            'x' | 'X' => Some(Cell::X),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::O => Some(Player::O),
            Cell::X => Some(Player::X),
            Cell::Empty => None,
        }
    }
}

/// A player in the game.
///
/// `O` carries id 1 and always opens; `X` carries id 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    O,
    X,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::O => Cell::O,
            Player::X => Cell::X,
        }
    }

    /// Numeric id used as a cell mark and outcome tag (1 or 2)
    pub fn id(self) -> u8 {
        match self {
            Player::O => 1,
            Player::X => 2,
        }
    }

    /// Look a player up by numeric id
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::O),
            2 => Some(Player::X),
            _ => None,
        }
    }

    /// The player to move after `depth` placements
    pub fn for_depth(depth: usize) -> Player {
        if depth.is_multiple_of(2) {
            Player::O
        } else {
            Player::X
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// 3×3 grid of cells stored row-major.
///
/// This type implements `Copy` so search code always works on its own
/// copy and never aliases a live game board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Build a board directly from its cells
    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Board { cells }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored. `o` marks player 1, `x` marks player 2 and `.`
    /// marks an empty cell.
    ///
    /// # Errors
    ///
    /// Returns error if the string does not hold exactly 9 cells or contains
    /// an unknown character.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; BOARD_SIZE];
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Get cell at position (0-8)
    ///
    /// # Panics
    ///
    /// Panics if `pos` is 9 or more.
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty; positions off the board never are
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells.get(pos) == Some(&Cell::Empty)
    }

    /// Number of occupied cells, which equals the number of moves played
    pub fn depth(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply a move to the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] for positions outside 0-8 and
    /// [`crate::Error::InvalidMove`] when the target cell is occupied.
    pub fn receive(&mut self, mv: Move) -> Result<(), crate::Error> {
        if mv.position >= BOARD_SIZE {
            return Err(crate::Error::InvalidPosition {
                position: mv.position,
            });
        }
        if !self.is_empty(mv.position) {
            return Err(crate::Error::InvalidMove {
                position: mv.position,
            });
        }
        self.cells[mv.position] = mv.player.to_cell();
        Ok(())
    }

    /// Place a mark without validation. Paired with [`Board::clear`] by search code.
    pub(crate) fn place(&mut self, pos: usize, player: Player) {
        debug_assert!(self.is_empty(pos), "placing on occupied cell {pos}");
        self.cells[pos] = player.to_cell();
    }

    /// Undo a placement made with [`Board::place`]
    pub(crate) fn clear(&mut self, pos: usize) {
        self.cells[pos] = Cell::Empty;
    }

    /// The board after `player` marks `pos`, leaving `self` untouched
    #[must_use = "with_mark returns a new board; the original is unchanged"]
    pub fn with_mark(&self, pos: usize, player: Player) -> Self {
        let mut next = *self;
        next.place(pos, player);
        next
    }

    /// Swap the two players' marks
    #[must_use = "swap_players returns a new board; the original is unchanged"]
    pub fn swap_players(&self) -> Self {
        let mut swapped = *self;
        for cell in &mut swapped.cells {
            *cell = match cell {
                Cell::O => Cell::X,
                Cell::X => Cell::O,
                Cell::Empty => Cell::Empty,
            };
        }
        swapped
    }

    /// The player whose turn it is, assuming O opened
    pub fn to_move(&self) -> Player {
        Player::for_depth(self.depth())
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        Rules::win(self, player)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        Rules::terminal(self)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        Rules::winner(self)
    }

    /// Order-preserving key used for value lookups
    pub fn key(&self) -> StateKey {
        StateKey::from(self)
    }

    /// Render the board for a human, showing position digits on empty cells
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(12);
        for (i, &cell) in self.cells.iter().enumerate() {
            match cell {
                Cell::Empty => out.push(char::from(b'0' + i as u8)),
                other => out.push(other.to_char()),
            }
            if (i + 1).is_multiple_of(3) {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(player: Player, position: usize) -> Move {
        Move { player, position }
    }

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.depth(), 0);
        assert_eq!(board.empty_positions().len(), 9);
        assert_eq!(board.to_move(), Player::O);
    }

    #[test]
    fn test_receive() {
        let mut board = Board::new();
        board.receive(mv(Player::O, 4)).unwrap();
        assert_eq!(board.get(4), Cell::O);
        assert_eq!(board.depth(), 1);
        assert_eq!(board.to_move(), Player::X);

        let err = board.receive(mv(Player::X, 4)).unwrap_err();
        assert!(err.to_string().contains("occupied"));
        assert_eq!(board.get(4), Cell::O);

        let err = board.receive(mv(Player::X, 9)).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidPosition { position: 9 }));
    }

    #[test]
    fn test_place_and_clear_restore_board() {
        let mut board = Board::from_string("o.x......").unwrap();
        let before = board;
        board.place(4, Player::O);
        assert_ne!(board, before);
        board.clear(4);
        assert_eq!(board, before);
    }

    #[test]
    fn test_with_mark_leaves_original() {
        let board = Board::new();
        let next = board.with_mark(0, Player::O);
        assert!(board.is_empty(0));
        assert_eq!(next.get(0), Cell::O);
    }

    #[test]
    fn test_reset() {
        let mut board = Board::from_string("oxoxoxoxo").unwrap();
        assert!(board.is_full());
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("ooo xx. ...").unwrap();
        assert_eq!(board.get(0), Cell::O);
        assert_eq!(board.get(3), Cell::X);
        assert_eq!(board.get(5), Cell::Empty);
        assert_eq!(board.depth(), 5);

        assert!(matches!(
            Board::from_string("ox"),
            Err(crate::Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            Board::from_string("ooo xx. ... x"),
            Err(crate::Error::InvalidBoardLength { got: 10, .. })
        ));
        assert!(matches!(
            Board::from_string("oxz......"),
            Err(crate::Error::InvalidCellCharacter {
                character: 'z',
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_is_empty_off_the_board() {
        let board = Board::from_string("o........").unwrap();
        assert!(!board.is_empty(0));
        assert!(board.is_empty(8));
        assert!(!board.is_empty(9));
        assert!(!board.is_empty(usize::MAX));
    }

    #[test]
    #[should_panic]
    fn test_get_off_the_board_panics() {
        Board::new().get(9);
    }

    #[test]
    fn test_swap_players() {
        let board = Board::from_string("ox.......").unwrap();
        let swapped = board.swap_players();
        assert_eq!(swapped.get(0), Cell::X);
        assert_eq!(swapped.get(1), Cell::O);
        assert_eq!(swapped.swap_players(), board);
    }

    #[test]
    fn test_player_ids() {
        assert_eq!(Player::O.id(), 1);
        assert_eq!(Player::X.id(), 2);
        assert_eq!(Player::from_id(2), Some(Player::X));
        assert_eq!(Player::from_id(0), None);
        assert_eq!(Player::for_depth(3), Player::X);
    }

    #[test]
    fn test_display_and_render() {
        let board = Board::from_string("ox..o...x").unwrap();
        assert_eq!(format!("{board}"), "ox.\n.o.\n..x");
        assert_eq!(board.render(), "ox2\n3o5\n67x\n");
    }
}
