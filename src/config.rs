//! Placement configuration.

use partition_core::{PartitionError, Partitioner};
use serde::{Deserialize, Serialize};

/// Placement settings for one benchmark run.
///
/// Loadable from the harness's config file; the zone list is optional and
/// partitions fall back to rack-number constraints without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Total number of warehouses in the schema.
    pub total: usize,
    /// Warehouses actively generating load.
    pub active: usize,
    /// Number of partitions to split the keyspace into.
    pub parts: usize,
    /// Geographic zones to pin partitions to, one per partition; empty
    /// means constrain by rack number instead.
    #[serde(default)]
    pub zones: Vec<String>,
}

impl PlacementConfig {
    /// Create a config with every warehouse active.
    pub fn new(total: usize, parts: usize) -> Self {
        Self {
            total,
            active: total,
            parts,
            zones: Vec::new(),
        }
    }

    /// Set the active warehouse count.
    pub fn with_active(mut self, active: usize) -> Self {
        self.active = active;
        self
    }

    /// Pin partitions to geographic zones instead of racks.
    pub fn with_zones(mut self, zones: Vec<String>) -> Self {
        self.zones = zones;
        self
    }

    /// Build the partitioner described by this config.
    pub fn partitioner(&self) -> Result<Partitioner, PartitionError> {
        Partitioner::new(self.total, self.active, self.parts)
    }
}
