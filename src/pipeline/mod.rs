//! Batch inference over a list of reference positions.
//!
//! A run takes parsed [`CoordinateRecord`](crate::core::position::CoordinateRecord)s,
//! orders them with a [`Schedule`], resolves each one, and collects the rows
//! in a [`ResultSink`] so output always follows input order.

use thiserror::Error;

pub mod progress;
pub mod runner;
pub mod scheduler;
pub mod sink;

pub use progress::{LogProgress, NoProgress, ProgressReporter};
pub use runner::{Pipeline, RunConfig, RunOutput, RunSummary};
pub use scheduler::Schedule;
pub use sink::{write_rows, OutputRow, ResultSink, RowFormat};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No valid positions found in input file")]
    NoValidPositions,

    #[error("Result slot {0} written twice")]
    SlotConflict(usize),

    #[error("Result slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("Result slot {0} was never written")]
    SlotUnfilled(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
