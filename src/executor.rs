//! Database collaborator abstraction for DDL execution and catalog probes.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls};

/// Trait for the statement-executing database session.
///
/// The planner only ever needs to run a statement and read back a scalar,
/// so the session is kept behind this narrow surface: tests script it
/// in memory, and production hands in a live connection.
#[async_trait::async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute a statement, discarding any rows it returns.
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Run a query expected to return a single boolean column.
    async fn query_bool(&self, sql: &str, params: &[&str]) -> Result<bool>;

    /// Run a query expected to return a single `bigint` column.
    async fn query_count(&self, sql: &str) -> Result<i64>;
}

/// Executor backed by a single tokio-postgres session.
///
/// The target engine speaks the PostgreSQL wire protocol, so one client
/// covers both DDL execution and catalog probes. All calls serialize on the
/// session; schema changes must not be issued concurrently.
pub struct PostgresExecutor {
    client: Arc<Mutex<Client>>,
}

impl PostgresExecutor {
    /// Connect to the database and smoke-test the session.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - PostgreSQL connection string (e.g.,
    ///   "host=localhost user=root port=26257 dbname=tpcc")
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        // Test connection
        client.simple_query("SELECT 1").await?;

        Ok(Self {
            client: Arc::new(Mutex::new(client)),
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Arc<Mutex<Client>>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl SqlExecutor for PostgresExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        let client = self.client.lock().await;
        client.batch_execute(sql).await?;
        Ok(())
    }

    async fn query_bool(&self, sql: &str, params: &[&str]) -> Result<bool> {
        let client = self.client.lock().await;
        let params: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        let row = client.query_one(sql, &params).await?;
        Ok(row.get(0))
    }

    async fn query_count(&self, sql: &str) -> Result<i64> {
        let client = self.client.lock().await;
        let row = client.query_one(sql, &[]).await?;
        Ok(row.get(0))
    }
}
