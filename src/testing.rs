//! Scripted executor for exercising the planner without a database.

use crate::executor::SqlExecutor;
use anyhow::{anyhow, Result};
use std::sync::Mutex;

/// In-memory [`SqlExecutor`] that records statements and plays back
/// scripted results.
///
/// By default every statement succeeds, every index-existence probe reports
/// the index present, and the partition count is zero. Failures are
/// injected by statement substring, so a test can fail one statement form
/// while letting its fallback through.
#[derive(Default)]
pub struct ScriptedExecutor {
    statements: Mutex<Vec<String>>,
    probes: Mutex<Vec<(String, String)>>,
    failures: Vec<(String, String)>,
    absent_indexes: Vec<String>,
    probe_failure: Option<String>,
    partition_count: i64,
}

impl ScriptedExecutor {
    /// Create an executor where everything succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every statement containing `pattern` with `message`.
    pub fn with_failure(mut self, pattern: &str, message: &str) -> Self {
        self.failures
            .push((pattern.to_string(), message.to_string()));
        self
    }

    /// Report `index` as absent from existence probes.
    pub fn with_absent_index(mut self, index: &str) -> Self {
        self.absent_indexes.push(index.to_string());
        self
    }

    /// Fail every existence probe with `message`.
    pub fn with_probe_failure(mut self, message: &str) -> Self {
        self.probe_failure = Some(message.to_string());
        self
    }

    /// Scripted result for the partition-count query.
    pub fn with_partition_count(mut self, count: i64) -> Self {
        self.partition_count = count;
        self
    }

    /// Every statement executed so far, in order. Probes are not included.
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    /// Every `(table, index)` existence probe issued so far, in order.
    pub fn probes(&self) -> Vec<(String, String)> {
        self.probes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SqlExecutor for ScriptedExecutor {
    async fn execute(&self, sql: &str) -> Result<()> {
        self.statements.lock().unwrap().push(sql.to_string());
        for (pattern, message) in &self.failures {
            if sql.contains(pattern.as_str()) {
                return Err(anyhow!("{message}"));
            }
        }
        Ok(())
    }

    async fn query_bool(&self, _sql: &str, params: &[&str]) -> Result<bool> {
        let table = params.first().copied().unwrap_or_default();
        let index = params.get(1).copied().unwrap_or_default();
        self.probes
            .lock()
            .unwrap()
            .push((table.to_string(), index.to_string()));

        if let Some(message) = &self.probe_failure {
            return Err(anyhow!("{message}"));
        }
        Ok(!self.absent_indexes.iter().any(|absent| absent == index))
    }

    async fn query_count(&self, _sql: &str) -> Result<i64> {
        Ok(self.partition_count)
    }
}
