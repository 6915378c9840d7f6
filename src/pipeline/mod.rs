//! Episode processing and reporting
//!
//! This module provides:
//! - [`Processor`], which plays episodes of a [`Game`](crate::tictactoe::Game)
//!   until a stop predicate fires
//! - Rolling win/draw/loss tallies and per-window reports
//! - Observers for logging, progress bars and in-memory metrics

pub mod observers;
pub mod processor;

pub use observers::{LogObserver, MetricsHandle, MetricsObserver, MetricsSummary, ProgressObserver};
pub use processor::{
    Processor, ProcessorConfig, ProcessorReport, Progress, RollingTally, Tally, WindowReport,
};

pub use crate::ports::Observer;
