//! On-chain SQL query tool

use crate::config::ChainbaseConfig;
use crate::error::{Error, Result};
use crate::format::format_query_result;
use crate::query::QueryClient;
use crate::tools::AgentTool;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Tool that runs a SQL query against Chainbase and replies with a table
pub struct QueryDataTool {
    client: QueryClient,
}

impl QueryDataTool {
    pub fn new(config: ChainbaseConfig) -> Self {
        Self {
            client: QueryClient::new(config),
        }
    }
}

#[async_trait]
impl AgentTool for QueryDataTool {
    const NAME: &'static str = "query_blockchain_data";

    fn description(&self) -> &'static str {
        "Queries on-chain data (blocks, transactions, token transfers) by \
         running SQL against the Chainbase data API."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "sql": {
                    "type": "string",
                    "description": "SQL query to execute against on-chain tables"
                }
            },
            "required": ["sql"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let sql = args
            .get("sql")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::Validation("missing 'sql' field".to_string()))?;

        let result = self.client.execute_query(sql).await?;
        Ok(json!({ "text": format_query_result(&result) }))
    }
}
