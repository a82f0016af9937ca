//! Agent-facing tool adapters
//!
//! The host agent runtime is external; these adapters are the seam it calls
//! through. Each tool takes loosely-typed JSON arguments, drives one of the
//! API clients, and returns chat-ready text in a `{"text": ...}` payload.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

mod query_data;
mod token_balance;

pub use query_data::QueryDataTool;
pub use token_balance::{TokenBalanceInput, TokenBalanceTool};

pub const TOOL_QUERY_DATA: &str = "chainbase/query_blockchain_data";
pub const TOOL_TOKEN_BALANCE: &str = "chainbase/retrieve_token_balance";

/// Contract between the host agent runtime and a tool. The host resolves
/// natural language into the JSON arguments; the tool owns everything from
/// validation to the formatted reply.
#[async_trait]
pub trait AgentTool: Send + Sync {
    const NAME: &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments `execute` accepts
    fn input_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> Result<Value>;
}
