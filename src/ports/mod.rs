//! Ports (trait boundaries) between the game core and its collaborators.
//!
//! Agents, observers and human input sources are owned by the core as
//! traits and implemented by adapters elsewhere in the crate or by callers.

pub mod agent;
pub mod input;
pub mod observer;

pub use agent::Agent;
pub use input::InputProvider;
pub use observer::Observer;
