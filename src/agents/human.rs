//! Human play through an injected input provider

use std::io::{self, BufRead, Write};

use crate::{
    Error, Result,
    ports::{Agent, InputProvider},
    tictactoe::{BOARD_SIZE, Board, Move, Player},
};

/// Agent whose moves come from a person.
///
/// Answers that are unparsable, out of range or aimed at an occupied cell
/// are reported back through the provider and asked for again. Provider
/// failures end the game.
pub struct HumanAgent {
    player: Player,
    name: String,
    input: Box<dyn InputProvider>,
}

impl HumanAgent {
    pub fn new(player: Player, input: Box<dyn InputProvider>) -> Self {
        Self {
            player,
            name: format!("Human-{player}"),
            input,
        }
    }
}

impl Agent for HumanAgent {
    fn player(&self) -> Player {
        self.player
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn play(&mut self, board: &Board) -> Result<Move> {
        if board.is_full() {
            return Err(Error::NoMovesLeft {
                player: self.player,
            });
        }

        let rendered = board.render();
        loop {
            match self.input.request_position(&rendered, self.player)? {
                None => self.input.reject("please enter a number from 0 to 8")?,
                Some(pos) if pos >= BOARD_SIZE => self
                    .input
                    .reject(&format!("position {pos} is off the board (0-8)"))?,
                Some(pos) if !board.is_empty(pos) => self
                    .input
                    .reject(&format!("position {pos} is already taken"))?,
                Some(pos) => return Ok(Move::new(self.player, pos)),
            }
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Terminal input provider reading one position per line from stdin
#[derive(Debug, Default)]
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputProvider for StdinInput {
    fn request_position(&mut self, rendered: &str, player: Player) -> Result<Option<usize>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "\n{rendered}{player} to move [0-8]: ")?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(Error::Input {
                message: "standard input closed".to_string(),
            });
        }
        Ok(line.trim().parse().ok())
    }

    fn reject(&mut self, reason: &str) -> Result<()> {
        writeln!(io::stdout().lock(), "{reason}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;

    /// Replays canned answers and records every rejection
    struct Scripted {
        answers: VecDeque<Option<usize>>,
        rejections: Arc<Mutex<Vec<String>>>,
    }

    impl Scripted {
        fn new(answers: &[Option<usize>]) -> (Self, Arc<Mutex<Vec<String>>>) {
            let rejections = Arc::new(Mutex::new(Vec::new()));
            let provider = Self {
                answers: answers.iter().copied().collect(),
                rejections: Arc::clone(&rejections),
            };
            (provider, rejections)
        }
    }

    impl InputProvider for Scripted {
        fn request_position(&mut self, _rendered: &str, _player: Player) -> Result<Option<usize>> {
            self.answers.pop_front().ok_or(Error::Input {
                message: "script exhausted".to_string(),
            })
        }

        fn reject(&mut self, reason: &str) -> Result<()> {
            self.rejections.lock().unwrap().push(reason.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_accepts_valid_position() {
        let (provider, rejections) = Scripted::new(&[Some(4)]);
        let mut agent = HumanAgent::new(Player::O, Box::new(provider));
        assert_eq!(agent.play(&Board::new()).unwrap(), Move::new(Player::O, 4));
        assert!(rejections.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reprompts_until_valid() {
        let board = Board::from_string("o.. ... ...").unwrap();
        let (provider, rejections) = Scripted::new(&[None, Some(12), Some(0), Some(8)]);
        let mut agent = HumanAgent::new(Player::X, Box::new(provider));

        assert_eq!(agent.play(&board).unwrap(), Move::new(Player::X, 8));
        let rejections = rejections.lock().unwrap();
        assert_eq!(rejections.len(), 3);
        assert!(rejections[2].contains("already taken"));
    }

    #[test]
    fn test_provider_errors_propagate() {
        let (provider, _) = Scripted::new(&[None]);
        let mut agent = HumanAgent::new(Player::O, Box::new(provider));
        assert!(matches!(agent.play(&Board::new()), Err(Error::Input { .. })));
    }

    #[test]
    fn test_full_board() {
        let (provider, _) = Scripted::new(&[Some(0)]);
        let mut agent = HumanAgent::new(Player::O, Box::new(provider));
        let board = Board::from_string("oxo oxx xoo").unwrap();
        assert!(matches!(
            agent.play(&board),
            Err(Error::NoMovesLeft { player: Player::O })
        ));
    }
}
