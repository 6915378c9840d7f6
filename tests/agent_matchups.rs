//! Head-to-head results between agents over the solved table

mod common;

use noughts::{
    agents::{BlendedAgent, FixedOrderAgent, LookupAgent, RandomAgent},
    tictactoe::Player,
};

#[test]
fn test_lookup_against_itself_always_draws() {
    let table = common::solved();
    let mut first = LookupAgent::new(Player::O, table.clone());
    let mut second = LookupAgent::new(Player::X, table);

    let report = common::play(&mut first, &mut second, 100, Player::O, 5);
    assert_eq!(report.draws, 100);
}

#[test]
fn test_lookup_never_loses_to_random() {
    let table = common::solved();

    let mut lookup = LookupAgent::new(Player::O, table.clone());
    let mut random = RandomAgent::new(Player::X);
    let report = common::play(&mut lookup, &mut random, 300, Player::O, 11);
    assert_eq!(report.losses, 0);
    assert!(report.wins > 0);

    let mut random = RandomAgent::new(Player::O);
    let mut lookup = LookupAgent::new(Player::X, table);
    let report = common::play(&mut random, &mut lookup, 300, Player::X, 12);
    assert_eq!(report.losses, 0);
}

#[test]
fn test_lookup_punishes_fixed_order() {
    let table = common::solved();
    let mut fixed = FixedOrderAgent::new(Player::O);
    let mut lookup = LookupAgent::new(Player::X, table);

    let report = common::play(&mut fixed, &mut lookup, 20, Player::X, 3);
    assert_eq!(report.losses, 0);
}

#[test]
fn test_lookup_never_loses_to_blended() {
    let table = common::solved();
    let mut blended = BlendedAgent::new(Player::O, table.clone(), 4).unwrap();
    let mut lookup = LookupAgent::new(Player::X, table);

    let report = common::play(&mut blended, &mut lookup, 200, Player::X, 17);
    assert_eq!(report.losses, 0);
}
