//! Error types for partitioner construction.

use thiserror::Error;

/// Errors raised when partitioner parameters fail validation.
///
/// These are construction-time precondition failures and are never retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    /// Total warehouse count was zero.
    #[error("total must be positive; {0}")]
    TotalNotPositive(usize),

    /// Active warehouse count was zero.
    #[error("active must be positive; {0}")]
    ActiveNotPositive(usize),

    /// Partition count was zero.
    #[error("parts must be positive; {0}")]
    PartsNotPositive(usize),

    /// More active warehouses than exist in total.
    #[error("active > total; {active} > {total}")]
    ActiveExceedsTotal { active: usize, total: usize },

    /// More partitions than warehouses to put in them.
    #[error("parts > total; {parts} > {total}")]
    PartsExceedTotal { parts: usize, total: usize },
}
