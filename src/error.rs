//! Error types for schema partitioning and placement.

use thiserror::Error;

/// Errors that can occur while partitioning the benchmark schema.
///
/// Statement failures carry the exact statement text so a failure can be
/// reproduced directly against the target database. Nothing here is
/// retried; by the time one of these surfaces, the schema may already be
/// partially altered and cleanup is the caller's decision.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// A DDL statement failed to execute.
    #[error("couldn't exec {statement:?}")]
    Statement {
        /// The statement that failed.
        statement: String,
        #[source]
        source: anyhow::Error,
    },

    /// The index-existence catalog probe failed.
    ///
    /// Distinct from the probe reporting the index absent, which is a
    /// legitimate skip and not an error.
    #[error("couldn't check for index {index} on table {table}")]
    ExistenceCheck {
        table: String,
        index: String,
        #[source]
        source: anyhow::Error,
    },

    /// Zone list doesn't line up with the partition count.
    #[error("{zones} zones for {parts} partitions; counts must match")]
    ZoneMismatch { zones: usize, parts: usize },

    /// Invalid partitioning parameters.
    #[error(transparent)]
    Partition(#[from] partition_core::PartitionError),
}
