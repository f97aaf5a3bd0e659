//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Node endpoint settings.
    pub rpc: RpcConfig,

    /// Chain and envelope settings.
    pub chain: ChainConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Node RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Failover JSON-RPC endpoint URLs, tried in order.
    pub failover_urls: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:26657".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

/// Chain identity and envelope defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain id mixed into every signed payload.
    pub chain_id: String,

    /// Message type used when the caller does not name one.
    pub default_msg_type: String,

    /// Memo mixed into every signed payload.
    pub memo: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: "local-testnet".to_string(),
            default_msg_type: "send".to_string(),
            memo: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Emit JSON lines instead of human-readable logs.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "tendersign=info".to_string(),
            json_logs: false,
        }
    }
}
