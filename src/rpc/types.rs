//! Parsed results of the node's RPC methods.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Result of one phase (`check_tx` or `deliver_tx`) of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    /// Absent or zero means success.
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub log: Option<String>,
}

impl TxOutcome {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failed(code: u32, log: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            log: Some(log.into()),
        }
    }

    /// Result code with absence treated as zero.
    pub fn code(&self) -> u32 {
        self.code.unwrap_or(0)
    }

    pub fn log(&self) -> &str {
        self.log.as_deref().unwrap_or("")
    }

    pub fn is_ok(&self) -> bool {
        self.code() == 0
    }
}

/// Response of `broadcast_tx_commit`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastTxResponse {
    #[serde(default)]
    pub check_tx: TxOutcome,
    #[serde(default)]
    pub deliver_tx: TxOutcome,
    #[serde(default)]
    pub hash: String,
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub height: u64,
}

/// Heights arrive as JSON strings from the node but as numbers from some proxies.
fn u64_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    use serde::de::Error;
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid height {}", n))),
        Value::String(s) => s
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid height {}", s))),
        other => Err(D::Error::custom(format!("invalid height {}", other))),
    }
}
