//! Common test utilities for the noughts test suite.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use noughts::{
    pipeline::{Processor, ProcessorConfig, ProcessorReport},
    ports::Agent,
    solver::Solver,
    tictactoe::{Game, Player},
    value_table::ValueTable,
};

/// Solved table shared by every test in a binary
pub fn solved() -> Arc<ValueTable> {
    static TABLE: OnceLock<Arc<ValueTable>> = OnceLock::new();
    Arc::clone(TABLE.get_or_init(|| Arc::new(Solver::new().solve())))
}

/// Play `episodes` games between two agents, counting results for `tracked`
pub fn play(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    episodes: usize,
    tracked: Player,
    seed: u64,
) -> ProcessorReport {
    let mut game = Game::new(vec![first, second]).expect("agents seated O then X");
    let config = ProcessorConfig::default()
        .with_window(episodes.max(1))
        .with_tracked(tracked)
        .with_seed(seed);
    let mut processor = Processor::new(config).expect("valid processor config");
    processor.run(&mut game, episodes).expect("episodes run")
}
