//! Fixed catalog of schema objects requiring partitioning.
//!
//! The benchmark schema is known up front, so the partition targets are
//! plain static data and the pipeline iterates them uniformly instead of
//! carrying a near-identical function per table.

/// A secondary index that gets its own range-partitioning pass.
#[derive(Debug, Clone, Copy)]
pub struct IndexTarget {
    /// Index name as recorded in the catalog.
    pub index: &'static str,
    /// Partition key column.
    pub column: &'static str,
    /// Partition-name disambiguator; keeps the index's `p<n>_<i>` names
    /// distinct from the table-level pass and from sibling indexes.
    pub number: usize,
}

/// A table partitioned by warehouse, plus any secondary indexes partitioned
/// alongside it.
#[derive(Debug, Clone, Copy)]
pub struct TableTarget {
    /// Table name as emitted in statements, quoted where the name collides
    /// with a keyword.
    pub table: &'static str,
    /// Partition key column.
    pub column: &'static str,
    /// Disambiguator for the table-level pass.
    pub number: usize,
    /// Secondary indexes requiring their own pass.
    pub indexes: &'static [IndexTarget],
}

/// The immutable reference table replicated per zone instead of partitioned.
#[derive(Debug, Clone, Copy)]
pub struct ReplicatedTable {
    /// Table name.
    pub table: &'static str,
    /// Primary key column the covering indexes are built over.
    pub primary_key: &'static str,
    /// Remaining columns, stored so every read is answered from the index.
    pub stored_columns: &'static [&'static str],
}

/// Partition targets in execution order.
pub const PARTITION_TARGETS: &[TableTarget] = &[
    TableTarget {
        table: "warehouse",
        column: "w_id",
        number: 0,
        indexes: &[],
    },
    TableTarget {
        table: "district",
        column: "d_w_id",
        number: 0,
        indexes: &[],
    },
    TableTarget {
        table: "new_order",
        column: "no_w_id",
        number: 0,
        indexes: &[],
    },
    TableTarget {
        table: r#""order""#,
        column: "o_w_id",
        number: 0,
        indexes: &[IndexTarget {
            index: "order_idx",
            column: "o_w_id",
            number: 1,
        }],
    },
    TableTarget {
        table: "order_line",
        column: "ol_w_id",
        number: 0,
        indexes: &[IndexTarget {
            index: "order_line_stock_fk_idx",
            column: "ol_supply_w_id",
            number: 1,
        }],
    },
    // stock_item_fk_idx has no warehouse prefix and cannot be partitioned.
    TableTarget {
        table: "stock",
        column: "s_w_id",
        number: 0,
        indexes: &[],
    },
    TableTarget {
        table: "customer",
        column: "c_w_id",
        number: 0,
        indexes: &[IndexTarget {
            index: "customer_idx",
            column: "c_w_id",
            number: 1,
        }],
    },
    TableTarget {
        table: "history",
        column: "h_w_id",
        number: 0,
        indexes: &[
            IndexTarget {
                index: "history_customer_fk_idx",
                column: "h_c_w_id",
                number: 1,
            },
            IndexTarget {
                index: "history_district_fk_idx",
                column: "h_w_id",
                number: 2,
            },
        ],
    },
];

/// The `item` table is never written during a run, so instead of
/// partitioning it every zone gets a covering index with a pinned
/// leaseholder, giving each zone a local read path.
pub const REPLICATED_TABLE: ReplicatedTable = ReplicatedTable {
    table: "item",
    primary_key: "i_id",
    stored_columns: &["i_im_id", "i_name", "i_price", "i_data"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disambiguators_unique_per_table() {
        for target in PARTITION_TARGETS {
            let mut numbers: Vec<usize> = target.indexes.iter().map(|i| i.number).collect();
            numbers.push(target.number);
            let before = numbers.len();
            numbers.sort_unstable();
            numbers.dedup();
            assert_eq!(before, numbers.len(), "colliding numbers on {}", target.table);
        }
    }

    #[test]
    fn test_warehouse_leads_the_catalog() {
        assert_eq!(PARTITION_TARGETS[0].table, "warehouse");
        assert_eq!(PARTITION_TARGETS[0].column, "w_id");
    }
}
