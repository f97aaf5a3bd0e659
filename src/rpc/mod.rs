//! Transport boundary to the remote node.
//!
//! # Data Flow
//! ```text
//! BroadcastCoordinator / CLI
//!     → Rpc trait (query, broadcast_tx_commit, block)
//!     → client.rs (JSON-RPC over HTTP, timeouts, failover endpoints)
//!     → blocks.rs (decode transactions and amounts read back from the node)
//! ```
//!
//! # Design Decisions
//! - The engine only sees parsed results; JSON-RPC envelopes are unwrapped here
//! - Every HTTP call has a deadline; there is no cancel path beyond it

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::ClientResult;

pub mod blocks;
pub mod client;
pub mod types;

pub use blocks::{block_txs, query_decoded};
pub use client::HttpRpc;
pub use types::{BroadcastTxResponse, TxOutcome};

/// Operations the engine needs from a node.
#[async_trait]
pub trait Rpc: Send + Sync {
    /// Application state query; returns the decoded JSON value (`Null` if absent).
    async fn query(&self, path: &str, key: &str) -> ClientResult<Value>;

    /// Submit a `base64(JSON)` transaction and wait for both phases.
    async fn broadcast_tx_commit(&self, tx: &str) -> ClientResult<BroadcastTxResponse>;

    /// Raw block at `height`.
    async fn block(&self, height: u64) -> ClientResult<Value>;
}

#[async_trait]
impl<R: Rpc + ?Sized> Rpc for Arc<R> {
    async fn query(&self, path: &str, key: &str) -> ClientResult<Value> {
        (**self).query(path, key).await
    }

    async fn broadcast_tx_commit(&self, tx: &str) -> ClientResult<BroadcastTxResponse> {
        (**self).broadcast_tx_commit(tx).await
    }

    async fn block(&self, height: u64) -> ClientResult<Value> {
        (**self).block(height).await
    }
}
