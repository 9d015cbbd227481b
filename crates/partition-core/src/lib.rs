//! Core partitioning logic for the benchmark placement planner.
//!
//! This crate splits a discrete keyspace of warehouses into disjoint,
//! near-equal partitions and assigns each partition its share of the
//! warehouses currently under load. It is pure computation: no I/O, no
//! shared mutable state, safe to build once at setup and read from any
//! number of workers afterward.

pub mod error;
pub mod partitioner;

pub use error::PartitionError;
pub use partitioner::Partitioner;
