//! Range-partition DDL synthesis and zone configuration.
//!
//! Statement shapes here are dictated by the target engine and must be
//! emitted exactly; the tests pin them down.

use crate::catalog::{IndexTarget, TableTarget};
use crate::error::PlacementError;
use crate::executor::SqlExecutor;
use crate::probe;
use partition_core::Partitioner;
use std::fmt;
use std::fmt::Write as _;
use tracing::{debug, info};

/// Kind of schema object being partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    Index,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Table => write!(f, "TABLE"),
            ObjectKind::Index => write!(f, "INDEX"),
        }
    }
}

/// Build the `ALTER ... PARTITION BY RANGE` statement for one object, with a
/// `p<number>_<i>` clause covering each partition's half-open range.
pub fn range_partition_statement(
    kind: ObjectKind,
    name: &str,
    column: &str,
    number: usize,
    partitioner: &Partitioner,
) -> String {
    let bounds = partitioner.bounds();
    let mut stmt = format!("ALTER {kind} {name} PARTITION BY RANGE ({column}) (\n");
    for i in 0..partitioner.parts() {
        let _ = write!(
            stmt,
            "  PARTITION p{number}_{i} VALUES FROM ({}) to ({})",
            bounds[i],
            bounds[i + 1]
        );
        if i + 1 < partitioner.parts() {
            stmt.push(',');
        }
        stmt.push('\n');
    }
    stmt.push_str(")\n");
    stmt
}

/// Placement constraint for one partition: its geographic zone when zones
/// were supplied, its rack number otherwise.
pub fn zone_constraint(zones: &[String], index: usize) -> String {
    if zones.is_empty() {
        format!("[+rack={index}]")
    } else {
        format!("[+zone={}]", zones[index])
    }
}

/// The one failure class worth a second attempt: the engine rejected the
/// statement form itself, which older versions do for the modern zone
/// syntax. Everything else propagates untouched.
fn is_syntax_error(err: &anyhow::Error) -> bool {
    format!("{err:#}").contains("syntax error")
}

/// Constrain one partition to its rack or zone.
///
/// The modern `CONFIGURE ZONE USING` form is tried first; on a syntax
/// error, and only then, the legacy `EXPERIMENTAL CONFIGURE ZONE` form is
/// tried exactly once. DDL is not generally safe to retry blindly, so no
/// other failure is reattempted.
pub async fn configure_zone(
    executor: &dyn SqlExecutor,
    table: &str,
    partition: &str,
    constraint: usize,
    zones: &[String],
) -> Result<(), PlacementError> {
    let constraints = zone_constraint(zones, constraint);

    let stmt = format!(
        "ALTER PARTITION {partition} OF TABLE {table} CONFIGURE ZONE USING constraints = '{constraints}'"
    );
    debug!("Zone config: {}", stmt);
    if let Err(err) = executor.execute(&stmt).await {
        if !is_syntax_error(&err) {
            return Err(PlacementError::Statement {
                statement: stmt,
                source: err,
            });
        }

        let stmt = format!(
            "ALTER PARTITION {partition} OF TABLE {table} EXPERIMENTAL CONFIGURE ZONE 'constraints: {constraints}'"
        );
        debug!("Retrying with legacy zone config: {}", stmt);
        if let Err(err) = executor.execute(&stmt).await {
            return Err(PlacementError::Statement {
                statement: stmt,
                source: err,
            });
        }
    }
    Ok(())
}

/// Range-partition one schema object and pin each partition to the rack or
/// zone matching its index.
#[allow(clippy::too_many_arguments)]
pub async fn partition_object(
    executor: &dyn SqlExecutor,
    partitioner: &Partitioner,
    zones: &[String],
    kind: ObjectKind,
    name: &str,
    column: &str,
    table: &str,
    number: usize,
) -> Result<(), PlacementError> {
    info!(
        "Partitioning {} {} into {} ranges on {}",
        kind,
        name,
        partitioner.parts(),
        column
    );

    let stmt = range_partition_statement(kind, name, column, number, partitioner);
    debug!("DDL: {}", stmt);
    if let Err(err) = executor.execute(&stmt).await {
        return Err(PlacementError::Statement {
            statement: stmt,
            source: err,
        });
    }

    for i in 0..partitioner.parts() {
        configure_zone(executor, table, &format!("p{number}_{i}"), i, zones).await?;
    }
    Ok(())
}

/// Partition a table and pin its partitions.
pub async fn partition_table(
    executor: &dyn SqlExecutor,
    partitioner: &Partitioner,
    zones: &[String],
    target: &TableTarget,
) -> Result<(), PlacementError> {
    partition_object(
        executor,
        partitioner,
        zones,
        ObjectKind::Table,
        target.table,
        target.column,
        target.table,
        target.number,
    )
    .await
}

/// Partition a secondary index, if it exists.
///
/// Some indexes only exist when foreign-key enforcement is on; an absent
/// index is skipped silently.
pub async fn partition_index(
    executor: &dyn SqlExecutor,
    partitioner: &Partitioner,
    zones: &[String],
    table: &TableTarget,
    index: &IndexTarget,
) -> Result<(), PlacementError> {
    if !probe::index_exists(executor, table.table, index.index).await? {
        info!(
            "Index {} not present on {}, skipping",
            index.index, table.table
        );
        return Ok(());
    }

    let name = format!("{}@{}", table.table, index.index);
    partition_object(
        executor,
        partitioner,
        zones,
        ObjectKind::Index,
        &name,
        index.column,
        table.table,
        index.number,
    )
    .await
}
