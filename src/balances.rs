//! ERC20 token-balance retrieval client
//!
//! One synchronous request per lookup; the upstream API paginates at the
//! configured page limit. Records that cannot be identified (empty name and
//! symbol, typically spam tokens) are dropped before the caller sees them.

use crate::config::ChainbaseConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header carrying the Chainbase API key on the account endpoints
const API_KEY_HEADER: &str = "x-api-key";

/// Parameters for a token-balance lookup
#[derive(Debug, Clone)]
pub struct TokenBalanceParams {
    pub chain_id: u64,
    pub address: String,
    /// Restrict the lookup to a single token contract
    pub contract_address: Option<String>,
}

/// One ERC20-style token holding, as reported upstream
///
/// `balance` is an integer-denominated string in the token's base unit;
/// dividing by `10^decimals` yields the display amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenWithBalance {
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub decimals: u32,
}

#[derive(Debug, Deserialize)]
struct TokenBalancesResponse {
    data: Option<Vec<TokenWithBalance>>,
}

/// Client for the account token-balance endpoint
pub struct BalanceClient {
    http: Client,
    config: ChainbaseConfig,
}

impl BalanceClient {
    pub fn new(config: ChainbaseConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Fetch token balances for an address
    ///
    /// Returns records in upstream order, minus unidentifiable tokens. An
    /// empty list is a valid result, not an error; a response without a
    /// `data` field is.
    pub async fn get_token_balances(
        &self,
        params: &TokenBalanceParams,
    ) -> Result<Vec<TokenWithBalance>> {
        debug!(
            chain_id = params.chain_id,
            address = %params.address,
            contract_address = ?params.contract_address,
            "fetching token balances"
        );

        let mut url = self.config.endpoint(&["account", "tokens"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("chain_id", &params.chain_id.to_string());
            pairs.append_pair("address", &params.address);
            pairs.append_pair("limit", &self.config.balance_page_limit.to_string());
            if let Some(contract) = &params.contract_address {
                pairs.append_pair("contract_address", contract);
            }
        }

        let response: TokenBalancesResponse = self
            .http
            .get(url)
            .header(API_KEY_HEADER, self.config.api_key())
            .send()
            .await?
            .json()
            .await?;

        let tokens = response.data.ok_or_else(|| {
            Error::Execution("no data returned from Chainbase API".to_string())
        })?;
        debug!(count = tokens.len(), "token balances retrieved");

        let tokens: Vec<TokenWithBalance> = tokens
            .into_iter()
            .filter(|token| !(token.name.is_empty() && token.symbol.is_empty()))
            .collect();

        // Balances must be non-negative integers in the token's base unit.
        for token in &tokens {
            if token.balance.parse::<u128>().is_err() {
                return Err(Error::Execution(format!(
                    "malformed balance {:?} for token {}",
                    token.balance, token.contract_address
                )));
            }
        }

        Ok(tokens)
    }
}
