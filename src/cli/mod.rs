//! CLI infrastructure for the `noughts` binary
//!
//! This module provides the command-line interface for solving the game,
//! playing agents against each other, and training learners.

pub mod commands;
pub mod config;
pub mod factory;
pub mod output;

pub use config::{AgentKind, TrainConfig};
pub use factory::AgentFactory;
