//! Chainbase agent CLI
//!
//! Command-line interface for exercising the agent tools directly: run a SQL
//! query to completion or list token balances for an address.

use chainbase_agent_tools::tools::{AgentTool, QueryDataTool, TokenBalanceTool};
use chainbase_agent_tools::{ChainbaseConfig, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "chainbase-agent")]
#[command(about = "Chainbase on-chain data tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Chainbase API key (overrides the CHAINBASE_API_KEY environment variable)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a SQL query and print the formatted results
    Query {
        /// SQL to run against the on-chain tables
        sql: String,
    },

    /// List ERC20 token balances for a wallet address
    Balances {
        /// Wallet address to look up
        address: String,

        /// Chain to query (1 = Ethereum mainnet)
        #[arg(long, default_value_t = 1)]
        chain_id: u64,

        /// Restrict the lookup to one token contract
        #[arg(long)]
        contract_address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = ChainbaseConfig::resolve(cli.api_key.as_deref())?;

    match cli.command {
        Commands::Query { sql } => {
            let tool = QueryDataTool::new(config);
            let reply = tool.execute(json!({ "sql": sql })).await?;
            print_reply(&reply);
        }
        Commands::Balances {
            address,
            chain_id,
            contract_address,
        } => {
            let tool = TokenBalanceTool::new(config);
            let reply = tool
                .execute(json!({
                    "address": address,
                    "chain_id": chain_id,
                    "contract_address": contract_address,
                }))
                .await?;
            print_reply(&reply);
        }
    }

    Ok(())
}

fn print_reply(reply: &serde_json::Value) {
    match reply.get("text").and_then(|text| text.as_str()) {
        Some(text) => println!("{text}"),
        None => println!("{reply}"),
    }
}
