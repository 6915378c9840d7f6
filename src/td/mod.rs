//! Temporal-difference value learning
//!
//! [`LearningAgent`] keeps a private [`ValueTable`](crate::value_table::ValueTable)
//! seeded with every reachable position. It plays near-greedily on
//! afterstate values and, once an episode ends, backs the outcome up
//! through the afterstates it produced:
//!
//! ```text
//! v[older] ← v[older] + α · (v[newer] − v[older])
//! ```
//!
//! applied to adjacent pairs from the terminal board backwards, with α
//! decayed by [`LearningRate`].
//!
//! ## Usage Example
//!
//! ```no_run
//! use noughts::{
//!     td::{LearnerConfig, LearningAgent, LearningRate},
//!     tictactoe::Player,
//! };
//!
//! let config = LearnerConfig::default()
//!     .with_greedy(0.9)
//!     .with_learning_rate(LearningRate {
//!         initial: 0.3,
//!         decay_base: 0.95,
//!         decay_window: 1000,
//!     });
//! let learner = LearningAgent::new(Player::O, config)?;
//! # Ok::<(), noughts::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod serialization;

pub use agent::{LearningAgent, Phase};
pub use config::{LearnerConfig, LearningRate};
pub use serialization::SavedLearner;
