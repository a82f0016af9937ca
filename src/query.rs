//! Chainbase query submission and polling client
//!
//! Chainbase executes SQL asynchronously: a query is submitted for execution,
//! the API hands back an execution id, and results are fetched by polling the
//! status endpoint until the execution reaches a terminal state. The poll
//! cadence is deliberately a fixed interval with a fixed attempt budget, so the
//! total timeout is `poll_interval * max_poll_attempts`.

use crate::config::ChainbaseConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Header carrying the Chainbase API key
const API_KEY_HEADER: &str = "X-API-KEY";

/// Normalize raw SQL for submission: newlines become spaces, semicolons are
/// stripped, and surrounding whitespace is trimmed.
pub fn normalize_sql(sql: &str) -> Result<String> {
    let processed = sql.replace('\n', " ").replace(';', "");
    let processed = processed.trim();
    if processed.is_empty() {
        return Err(Error::Validation("SQL query is empty".to_string()));
    }
    Ok(processed.to_string())
}

/// Column descriptor in a query result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub name: String,
}

/// Terminal-success result of an executed query
///
/// `columns` and `rows` are `None` when the API reported completion without a
/// result set; rows are positionally aligned with `columns`.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// The normalized SQL that was executed
    pub sql: String,
    pub columns: Option<Vec<Column>>,
    pub rows: Option<Vec<Vec<Value>>>,
    /// Upstream row count; may exceed `rows.len()` when the API paginates
    pub total_rows: Option<u64>,
}

/// Execution status reported by the results endpoint. Anything that is not a
/// terminal state counts as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ExecutionStatus {
    Finished,
    Failed,
    #[serde(other)]
    Pending,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    data: Vec<ExecutionHandle>,
}

#[derive(Debug, Deserialize)]
struct ExecutionHandle {
    #[serde(rename = "executionId", default)]
    execution_id: String,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    data: ExecutionResults,
}

#[derive(Debug, Deserialize)]
struct ExecutionResults {
    status: ExecutionStatus,
    #[serde(default)]
    columns: Option<Vec<Column>>,
    #[serde(default)]
    data: Option<Vec<Vec<Value>>>,
    #[serde(default)]
    total_row_count: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the asynchronous query-execution API
pub struct QueryClient {
    http: Client,
    config: ChainbaseConfig,
}

impl QueryClient {
    pub fn new(config: ChainbaseConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Execute a SQL query to completion
    ///
    /// Submits the normalized query, then polls the results endpoint at the
    /// configured interval until the execution finishes, fails, or the poll
    /// budget runs out.
    pub async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        self.execute_query_with_cancel(sql, CancellationToken::new())
            .await
    }

    /// Like [`execute_query`](Self::execute_query), but aborts with
    /// [`Error::Cancelled`] when the token fires. The token is checked before
    /// each poll and during the inter-poll delay.
    pub async fn execute_query_with_cancel(
        &self,
        sql: &str,
        cancel: CancellationToken,
    ) -> Result<QueryResult> {
        let sql = normalize_sql(sql)?;
        debug!(sql = %sql, "executing Chainbase query");

        let execution_id = self.submit(&sql).await?;
        debug!(execution_id = %execution_id, "query submitted");

        for attempt in 1..=self.config.max_poll_attempts {
            debug!(
                attempt,
                max = self.config.max_poll_attempts,
                "polling query results"
            );

            let results = tokio::select! {
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                results = self.poll_results(&execution_id) => results?,
            };

            match results.status {
                ExecutionStatus::Failed => {
                    return Err(Error::Execution(results.message.unwrap_or_else(|| {
                        "query failed with unknown error".to_string()
                    })));
                }
                ExecutionStatus::Finished => {
                    debug!(
                        total_rows = ?results.total_row_count,
                        "query finished"
                    );
                    return Ok(QueryResult {
                        sql,
                        columns: results.columns,
                        rows: results.data,
                        total_rows: results.total_row_count,
                    });
                }
                ExecutionStatus::Pending => {
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(Error::Cancelled),
                        _ = tokio::time::sleep(self.config.poll_interval) => {}
                    }
                }
            }
        }

        Err(Error::Timeout(self.config.timeout_seconds()))
    }

    /// Submit the query for execution and return the execution id
    async fn submit(&self, sql: &str) -> Result<String> {
        let url = self.config.endpoint(&["query", "execute"])?;
        let response: ExecuteResponse = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.config.api_key())
            .json(&json!({ "sql": sql }))
            .send()
            .await?
            .json()
            .await?;

        let execution_id = response
            .data
            .into_iter()
            .next()
            .map(|handle| handle.execution_id)
            .unwrap_or_default();

        if execution_id.is_empty() {
            return Err(Error::Execution(
                "no execution id returned from query submission".to_string(),
            ));
        }
        Ok(execution_id)
    }

    /// One poll of the results endpoint. Network errors propagate immediately;
    /// there is no per-poll retry.
    async fn poll_results(&self, execution_id: &str) -> Result<ExecutionResults> {
        let url = self
            .config
            .endpoint(&["execution", execution_id, "results"])?;
        let response: ResultsResponse = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.config.api_key())
            .send()
            .await?
            .json()
            .await?;
        Ok(response.data)
    }
}
