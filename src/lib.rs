//! Partitioning and data-placement planner for TPCC-style benchmarks on
//! distributed SQL engines.
//!
//! Given `total` warehouses, an `active` subset under load, and a target
//! partition count, this library computes a balanced split of the keyspace
//! and drives the DDL that range-partitions the benchmark schema and pins
//! each partition to a rack or geographic zone.
//!
//! # Components
//!
//! - [`partition_core::Partitioner`] - pure computation of partition
//!   bounds, active-element assignment, and uniform sampling
//! - [`executor::SqlExecutor`] - the opaque statement-executing session,
//!   with a tokio-postgres implementation
//! - [`ddl`] - range-partition and zone-configuration DDL, including the
//!   legacy-dialect fallback
//! - [`catalog`] - the fixed table/index catalog of the benchmark schema
//! - [`pipeline::PlacementPipeline`] - sequential orchestration over the
//!   whole catalog plus reference-table replication
//!
//! # Example
//!
//! ```ignore
//! use tpcc_partition::{PlacementConfig, PlacementPipeline, PostgresExecutor};
//!
//! let config = PlacementConfig::new(1000, 3).with_active(500);
//! let partitioner = config.partitioner()?;
//! let executor = PostgresExecutor::connect("host=localhost port=26257 user=root").await?;
//! PlacementPipeline::new(&executor, &partitioner, &config.zones)?
//!     .run()
//!     .await?;
//! ```

pub mod catalog;
pub mod config;
pub mod ddl;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod probe;
pub mod testing;

pub use config::PlacementConfig;
pub use error::PlacementError;
pub use executor::{PostgresExecutor, SqlExecutor};
pub use partition_core::{PartitionError, Partitioner};
pub use pipeline::PlacementPipeline;
