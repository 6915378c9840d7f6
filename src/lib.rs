//! Noughts and crosses: exact solver, temporal-difference learner and agents
//!
//! This crate provides:
//! - A 3×3 board with rules, state keys and a turn sequencer
//! - An exhaustive minimax solver over every reachable position
//! - A TD(0) afterstate learner with a decaying learning rate
//! - Interchangeable agents (human, fixed-order, random, lookup, blended,
//!   learning) behind one trait
//! - An episode processor with rolling win/draw/loss reporting

pub mod agents;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod solver;
pub mod td;
pub mod tictactoe;
pub mod value_table;

pub use error::{Error, Result};
pub use value_table::ValueTable;
