//! Read-only catalog probes.

use crate::error::PlacementError;
use crate::executor::SqlExecutor;

const INDEX_EXISTS: &str = "\
SELECT count(*) > 0
FROM information_schema.statistics
WHERE table_name = $1
AND   index_name = $2";

const PARTITION_COUNT: &str = r"
SELECT count(*)
FROM crdb_internal.tables t
JOIN crdb_internal.partitions p
USING (table_id)
WHERE t.name = 'warehouse'
AND p.name ~ 'p0_\d+'";

/// Check whether `index` exists on `table`.
///
/// Absence is reported as `Ok(false)` and is a legitimate result, not a
/// failure; a probe that cannot complete is an error and must not be
/// mistaken for absence.
pub async fn index_exists(
    executor: &dyn SqlExecutor,
    table: &str,
    index: &str,
) -> Result<bool, PlacementError> {
    // The catalog records the unquoted spelling of reserved names.
    let catalog_name = table.trim_matches('"');
    executor
        .query_bool(INDEX_EXISTS, &[catalog_name, index])
        .await
        .map_err(|source| PlacementError::ExistenceCheck {
            table: catalog_name.to_string(),
            index: index.to_string(),
            source,
        })
}

/// Number of table-level partitions present on the `warehouse` table.
///
/// Used to verify a completed run from the outside; the pipeline itself
/// never reads this.
pub async fn partition_count(executor: &dyn SqlExecutor) -> Result<i64, PlacementError> {
    executor
        .query_count(PARTITION_COUNT)
        .await
        .map_err(|source| PlacementError::Statement {
            statement: PARTITION_COUNT.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedExecutor;

    #[tokio::test]
    async fn test_index_exists_probes_unquoted_name() {
        let executor = ScriptedExecutor::new();
        let exists = index_exists(&executor, r#""order""#, "order_idx")
            .await
            .unwrap();

        assert!(exists);
        assert_eq!(
            executor.probes(),
            vec![("order".to_string(), "order_idx".to_string())]
        );
    }

    #[tokio::test]
    async fn test_absent_index_is_not_an_error() {
        let executor = ScriptedExecutor::new().with_absent_index("customer_idx");
        let exists = index_exists(&executor, "customer", "customer_idx")
            .await
            .unwrap();

        assert!(!exists);
    }

    #[tokio::test]
    async fn test_probe_failure_is_an_error() {
        let executor = ScriptedExecutor::new().with_probe_failure("connection reset");
        let err = index_exists(&executor, "customer", "customer_idx")
            .await
            .unwrap_err();

        match err {
            PlacementError::ExistenceCheck { table, index, .. } => {
                assert_eq!(table, "customer");
                assert_eq!(index, "customer_idx");
            }
            other => panic!("expected existence-check error, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_partition_count() {
        let executor = ScriptedExecutor::new().with_partition_count(3);
        assert_eq!(partition_count(&executor).await.unwrap(), 3);
    }
}
