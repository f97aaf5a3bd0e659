//! Error taxonomy shared by every subsystem.

use thiserror::Error;

/// The two independently reported phases of transaction submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    /// Pre-execution admission check (`check_tx`).
    Check,
    /// Execution against application state (`deliver_tx`).
    Deliver,
}

impl std::fmt::Display for TxStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStage::Check => write!(f, "check_tx"),
            TxStage::Deliver => write!(f, "deliver_tx"),
        }
    }
}

/// Errors that can occur while encoding, signing or broadcasting.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Tagged key string starts with no known type prefix.
    #[error("Unknown key prefix: {0}")]
    UnknownKeyPrefix(String),

    /// Key material is not valid hex, has the wrong length, or is not on the curve.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Signing failed on otherwise well-formed key material.
    #[error("Signature error: {0}")]
    Signature(String),

    /// Node reported an invalid sequence but the log carried no `expected N` hint.
    #[error("Invalid sequence reported without expected value in log: {log}")]
    MalformedSequence { log: String },

    /// Transaction rejected by the pre-execution check.
    #[error("check_tx failed with code {code}: {log}")]
    CheckTxFailed { code: u32, log: String },

    /// Transaction admitted but failed during execution.
    #[error("deliver_tx failed with code {code}: {log}")]
    DeliverTxFailed { code: u32, log: String },

    /// JSON or base64 (de)serialization failure.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),
}

impl ClientError {
    /// Stage at which the node rejected the transaction, if this is a rejection.
    pub fn stage(&self) -> Option<TxStage> {
        match self {
            ClientError::CheckTxFailed { .. } => Some(TxStage::Check),
            ClientError::DeliverTxFailed { .. } => Some(TxStage::Deliver),
            _ => None,
        }
    }

    /// Node-assigned result code for rejections.
    pub fn code(&self) -> Option<u32> {
        match self {
            ClientError::CheckTxFailed { code, .. } | ClientError::DeliverTxFailed { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// No error is retried generically. The sequence-correction retry is driven
    /// by a successful response, not by an error.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Encoding(format!("JSON: {}", e))
    }
}

impl From<base64::DecodeError> for ClientError {
    fn from(e: base64::DecodeError) -> Self {
        ClientError::Encoding(format!("base64: {}", e))
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
