//! `chain-signer` command line.
//!
//! Configuration comes from an optional TOML file plus `ETH_*` environment
//! variables; the private key is read from `ETH_PRIVATE_KEY` only.

use std::path::PathBuf;

use alloy::primitives::{Address, Bytes, B256};
use clap::{Parser, Subcommand};
use serde_json::json;

use chain_signer::blockchain::wallet::private_key_from_env;
use chain_signer::config::{load_config, ClientConfig};
use chain_signer::observability::logging;
use chain_signer::SignedChainClient;

#[derive(Parser)]
#[command(name = "chain-signer")]
#[command(about = "Sign messages and submit transactions through a JSON-RPC endpoint", long_about = None)]
struct Cli {
    /// TOML configuration file (environment variables still override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the address of the configured key
    Address,
    /// Read a storage slot of a contract
    Storage { contract: Address, slot: B256 },
    /// Sign keccak256(message); message is hex
    Sign { message: Bytes },
    /// Run a read-only contract call; data is hex calldata
    Call { to: Address, data: Bytes },
    /// Sign and broadcast a zero-value transaction; data is hex calldata
    Send { to: Address, data: Bytes },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER);
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::from_env()?,
    };
    let key = private_key_from_env();

    let client = SignedChainClient::connect(config, key.as_deref()).await?;

    let output = match cli.command {
        Commands::Address => json!({ "address": client.resolve_own_address()? }),
        Commands::Storage { contract, slot } => {
            json!({ "value": client.read_storage_at(contract, slot).await? })
        }
        Commands::Sign { message } => {
            let signature = client.sign_message(&message).await?;
            json!({
                "v": signature.v,
                "r": signature.r,
                "s": signature.s,
                "signature": Bytes::copy_from_slice(&signature.to_bytes()),
            })
        }
        Commands::Call { to, data } => {
            json!({ "result": client.call_contract_read_only(to, data).await? })
        }
        Commands::Send { to, data } => {
            json!({ "tx_hash": client.submit_transaction(to, data).await? })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
