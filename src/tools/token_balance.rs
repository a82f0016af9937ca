//! Token-balance listing tool

use crate::balances::{BalanceClient, TokenBalanceParams};
use crate::config::ChainbaseConfig;
use crate::error::{Error, Result};
use crate::format::format_token_balance;
use crate::tools::AgentTool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// Chain used when the host supplies no chain id (Ethereum mainnet)
const DEFAULT_CHAIN_ID: u64 = 1;

/// Arguments extracted by the host runtime from the user's message
#[derive(Debug, Deserialize)]
pub struct TokenBalanceInput {
    pub address: String,
    pub chain_id: Option<u64>,
    pub contract_address: Option<String>,
}

/// Tool that lists ERC20 holdings for a wallet address
pub struct TokenBalanceTool {
    client: BalanceClient,
}

impl TokenBalanceTool {
    pub fn new(config: ChainbaseConfig) -> Self {
        Self {
            client: BalanceClient::new(config),
        }
    }
}

#[async_trait]
impl AgentTool for TokenBalanceTool {
    const NAME: &'static str = "retrieve_token_balance";

    fn description(&self) -> &'static str {
        "Retrieves ERC20 token balances held by a wallet address, optionally \
         restricted to one token contract."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "string",
                    "description": "Wallet address to look up"
                },
                "chain_id": {
                    "type": "integer",
                    "description": "Chain to query (default: 1, Ethereum mainnet)"
                },
                "contract_address": {
                    "type": "string",
                    "description": "Restrict the lookup to one token contract"
                }
            },
            "required": ["address"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let input: TokenBalanceInput = serde_json::from_value(args)
            .map_err(|e| Error::Validation(format!("invalid token balance request: {e}")))?;

        let params = TokenBalanceParams {
            chain_id: input.chain_id.unwrap_or(DEFAULT_CHAIN_ID),
            address: input.address,
            contract_address: input.contract_address,
        };
        let tokens = self.client.get_token_balances(&params).await?;

        let text = if tokens.is_empty() {
            format!(
                "Sorry, we can't find any token balances for {}",
                params.address
            )
        } else {
            tokens
                .iter()
                .map(format_token_balance)
                .collect::<Vec<_>>()
                .join("\n")
        };
        Ok(json!({ "text": text }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_schema_requires_address() {
        let tool = TokenBalanceTool::new(ChainbaseConfig::new("test-key"));
        let schema = tool.input_schema();
        assert_eq!(schema["required"][0], "address");
        assert!(schema["properties"]["chain_id"].is_object());
    }

    #[tokio::test]
    async fn missing_address_is_a_validation_error() {
        let tool = TokenBalanceTool::new(ChainbaseConfig::new("test-key"));
        let err = tool
            .execute(json!({ "chain_id": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn input_accepts_optional_fields() {
        let input: TokenBalanceInput = serde_json::from_value(json!({
            "address": "0x7719fD6A5a951746c8c26E3DFd143f6b96Db6412"
        }))
        .expect("parse input");
        assert!(input.chain_id.is_none());
        assert!(input.contract_address.is_none());
    }
}
