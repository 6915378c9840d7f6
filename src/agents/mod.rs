//! Decision policies implementing [`Agent`](crate::ports::Agent)
//!
//! The temporal-difference learner lives in [`crate::td`]; everything that
//! does not learn is here.

pub mod baseline;
pub mod human;
pub mod lookup;

pub use baseline::{FixedOrderAgent, RandomAgent};
pub use human::{HumanAgent, StdinInput};
pub use lookup::{BlendedAgent, LookupAgent};
