//! tendersign command-line client.
//!
//! ```text
//! tendersign keygen
//! tendersign --key E1B0F79B20... pubkey
//! tendersign sign --msg '{"to":"bob","amount":{"amount":"5"}}'
//! tendersign broadcast --msg-type send --msg '[{...},{...}]' --sequence 4
//! tendersign block 120
//! tendersign query /accounts alice
//! ```

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use tendersign::broadcast::BroadcastCoordinator;
use tendersign::config::{load_or_default, ClientConfig};
use tendersign::keys::{self, PrivateKey};
use tendersign::observability::logging::init_logging;
use tendersign::rpc::{block_txs, query_decoded, HttpRpc};
use tendersign::tx::{build_tx, TxBuilder};

#[derive(Parser)]
#[command(name = "tendersign")]
#[command(about = "Sign and broadcast transactions to a Tendermint-style node", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tagged private key. Falls back to TENDERSIGN_PRIVATE_KEY.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new random private key
    Keygen,
    /// Deterministically derive a private key from a tagged seed key
    Derive {
        #[arg(long)]
        seed: String,
    },
    /// Print the public key for the private key
    Pubkey,
    /// Sign messages offline and print the wire transaction
    Sign {
        /// JSON message, or a JSON array of messages
        #[arg(long)]
        msg: String,
        #[arg(long)]
        msg_type: Option<String>,
        #[arg(long, default_value_t = 0)]
        sequence: u64,
    },
    /// Sign and broadcast messages, correcting a stale sequence once
    Broadcast {
        #[arg(long)]
        msg: String,
        #[arg(long)]
        msg_type: Option<String>,
        #[arg(long)]
        sequence: Option<u64>,
    },
    /// Decode the transactions committed in a block
    Block { height: u64 },
    /// Query application state
    Query { path: String, key: String },
    /// Check node connectivity
    Health,
}

fn load_key(cli_key: Option<&str>) -> Result<PrivateKey, Box<dyn std::error::Error>> {
    Ok(match cli_key {
        Some(tagged) => keys::decode_priv_key(tagged)?,
        None => PrivateKey::from_env()?,
    })
}

fn parse_msgs(raw: &str) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    Ok(match serde_json::from_str(raw)? {
        Value::Array(msgs) => msgs,
        single => vec![single],
    })
}

fn tx_builder(cli_key: Option<&str>, config: &ClientConfig) -> Result<TxBuilder, Box<dyn std::error::Error>> {
    let key = load_key(cli_key)?;
    let builder = TxBuilder::new(key.as_secp256k1()?.clone(), config.chain.chain_id.clone())?
        .with_memo(config.chain.memo.clone());
    Ok(builder)
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::debug!(
        rpc_url = %config.rpc.url,
        chain_id = %config.chain.chain_id,
        "Configuration loaded"
    );

    let key_arg = cli.key.as_deref();

    match cli.command {
        Commands::Keygen => {
            let key = keys::generate();
            let pub_key = keys::derive_from_private(&key)?;
            print_json(&json!({ "private_key": key, "public_key": pub_key }))?;
        }
        Commands::Derive { seed } => {
            let key = keys::derive(&seed)?;
            let pub_key = keys::derive_from_private(&key)?;
            print_json(&json!({ "private_key": key, "public_key": pub_key }))?;
        }
        Commands::Pubkey => {
            let key = load_key(key_arg)?;
            println!("{}", key.as_secp256k1()?.public_key()?.encode());
        }
        Commands::Sign {
            msg,
            msg_type,
            sequence,
        } => {
            let msgs = parse_msgs(&msg)?;
            let msg_type = msg_type.unwrap_or_else(|| config.chain.default_msg_type.clone());
            let builder = tx_builder(key_arg, &config)?;

            let sign_bytes = builder.sign_bytes(&msg_type, &msgs, sequence)?;
            let signature = builder.sign(&msg_type, &msgs, sequence)?;
            let tx = build_tx(&msgs, &msg_type, builder.public_key(), &signature, sequence);

            print_json(&json!({
                "sign_bytes": String::from_utf8_lossy(&sign_bytes),
                "signature": signature.to_hex(),
                "tx": tx.encode()?,
            }))?;
        }
        Commands::Broadcast {
            msg,
            msg_type,
            sequence,
        } => {
            let msgs = parse_msgs(&msg)?;
            let msg_type = msg_type.unwrap_or_else(|| config.chain.default_msg_type.clone());
            let builder = tx_builder(key_arg, &config)?;
            let rpc = HttpRpc::new(config.rpc.clone())?;
            let coordinator = BroadcastCoordinator::new(rpc, builder);

            let receipt = coordinator.broadcast(&msg_type, &msgs, sequence).await?;
            print_json(&json!({
                "hash": receipt.hash,
                "height": receipt.height,
                "sequence": receipt.sequence,
                "sequence_corrected": receipt.sequence_corrected,
            }))?;
        }
        Commands::Block { height } => {
            let rpc = HttpRpc::new(config.rpc.clone())?;
            let txs = block_txs(&rpc, height).await?;
            print_json(&txs)?;
        }
        Commands::Query { path, key } => {
            let rpc = HttpRpc::new(config.rpc.clone())?;
            let value = query_decoded(&rpc, &path, &key).await?;
            print_json(&value)?;
        }
        Commands::Health => {
            let rpc = HttpRpc::new(config.rpc.clone())?;
            let healthy = rpc.is_healthy().await;
            println!("{}", if healthy { "healthy" } else { "unreachable" });
            if !healthy {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
