//! Rules and turn sequencing on concrete positions

use noughts::{
    Error,
    agents::{FixedOrderAgent, RandomAgent},
    ports::Agent,
    tictactoe::{Board, Game, GameOutcome, Move, Player, Rules},
};

#[test]
fn test_top_row_for_first_player() {
    // o o o
    // x x .
    // . . .
    let board = Board::from_string("oooxx....").unwrap();
    assert!(Rules::win(&board, Player::O));
    assert!(!Rules::win(&board, Player::X));
    assert!(Rules::terminal(&board));
    assert!(!Rules::draw(&board));

    let mut first = FixedOrderAgent::new(Player::O);
    let mut second = FixedOrderAgent::new(Player::X);
    let game = Game::new(vec![&mut first, &mut second])
        .unwrap()
        .with_board(board);

    assert!(game.finished());
    let outcome = game.result().unwrap();
    assert_eq!(outcome, GameOutcome::Win(Player::O));
    assert_eq!(outcome.winner_id(), 1);
}

#[test]
fn test_result_before_the_end() {
    let mut first = FixedOrderAgent::new(Player::O);
    let mut second = FixedOrderAgent::new(Player::X);
    let mut game = Game::new(vec![&mut first, &mut second]).unwrap();

    game.next().unwrap();
    game.next().unwrap();
    assert!(!game.finished());
    assert!(matches!(game.result(), Err(Error::NotFinished)));
}

#[test]
fn test_full_board_draw() {
    // o x o
    // o x x
    // x o o
    let board = Board::from_string("oxo oxx xoo").unwrap();
    assert!(Rules::draw(&board));
    assert!(Rules::terminal(&board));
    assert_eq!(Rules::winner(&board), None);
    assert_eq!(GameOutcome::from_board(&board), Some(GameOutcome::Draw));
    assert_eq!(GameOutcome::Draw.winner_id(), 0);
}

#[test]
fn test_win_is_symmetric_under_relabeling() {
    for text in ["ooo xx. ...", "x.o xo. o.x", "xxx oo. o..", "oxo xox ..."] {
        let board = Board::from_string(text).unwrap();
        let swapped = board.swap_players();
        for player in [Player::O, Player::X] {
            assert_eq!(
                Rules::win(&board, player),
                Rules::win(&swapped, player.opponent()),
                "relabeling changed the result on {text}"
            );
        }
    }
}

#[test]
fn test_baseline_agents_only_target_empty_cells() {
    let mut random = RandomAgent::with_seed(Player::X, 31);
    let mut fixed = FixedOrderAgent::new(Player::X);

    let mut board = Board::new();
    board.receive(Move::new(Player::O, 4)).unwrap();
    board.receive(Move::new(Player::X, 0)).unwrap();
    board.receive(Move::new(Player::O, 8)).unwrap();

    for _ in 0..200 {
        assert!(board.is_empty(random.play(&board).unwrap().position));
    }
    assert_eq!(fixed.play(&board).unwrap().position, 1);

    let full = Board::from_string("oxo oxx xoo").unwrap();
    assert!(matches!(
        random.play(&full),
        Err(Error::NoMovesLeft { player: Player::X })
    ));
    assert!(matches!(
        fixed.play(&full),
        Err(Error::NoMovesLeft { player: Player::X })
    ));
}

#[test]
fn test_random_games_always_finish_legally() {
    let mut first = RandomAgent::with_seed(Player::O, 1);
    let mut second = RandomAgent::with_seed(Player::X, 2);
    let mut game = Game::new(vec![&mut first, &mut second]).unwrap();

    for _ in 0..200 {
        game.reset();
        while !game.finished() {
            // an occupied target would surface as InvalidMove here
            game.next().unwrap();
        }
        let moves = game.moves().len();
        assert!((5..=9).contains(&moves));
        assert_eq!(game.board().depth(), moves);
    }
}
