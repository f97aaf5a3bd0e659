//! Client-side signing engine for a Tendermint-style state machine.
//!
//! Turns domain messages into canonically ordered, secp256k1-signed
//! transaction envelopes, submits them, and interprets the two-phase
//! (`check_tx` / `deliver_tx`) result.
//!
//! ```text
//! domain message
//!     → encoding (canonical sign bytes)
//!     → signing (r || s)
//!     → tx (base64 JSON wire tx)
//!     → rpc (broadcast_tx_commit)
//!     → broadcast (classification, one sequence retry)
//! ```

pub mod broadcast;
pub mod config;
pub mod encoding;
pub mod error;
pub mod keys;
pub mod observability;
pub mod rpc;
pub mod signing;
pub mod tx;

pub use broadcast::{BroadcastCoordinator, BroadcastReceipt};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, TxStage};
pub use rpc::{HttpRpc, Rpc};
pub use tx::{TxBuilder, WireTx};
