//! Exhaustive game-theoretic solver
//!
//! The solver enumerates every position reachable from the empty board and
//! records its exact minimax value. The resulting table backs the lookup
//! agents and can be persisted with [`SavedTable`].

pub mod search;
pub mod serialization;

pub use search::Solver;
pub use serialization::{SavedTable, TableKind};
