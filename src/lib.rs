//! Chainbase Agent Tools
//!
//! On-chain data tools for conversational agents:
//! - Submit SQL to Chainbase's asynchronous query API and poll to completion
//! - Fetch ERC20 token balances for a wallet address
//! - Render both result shapes as chat-ready text
//!
//! The agent runtime that turns natural language into tool arguments is
//! external; this crate owns everything from the tool seam down to the wire.

pub mod balances;
pub mod config;
pub mod format;
pub mod query;
pub mod tools;

mod error;

// Re-export commonly used types
pub use balances::{BalanceClient, TokenBalanceParams, TokenWithBalance};
pub use config::{ChainbaseConfig, CHAINBASE_API_KEY_ENV};
pub use error::{Error, Result};
pub use query::{normalize_sql, Column, QueryClient, QueryResult};
