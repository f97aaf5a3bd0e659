//! Transaction building subsystem.
//!
//! # Data Flow
//! ```text
//! domain messages + tagged key + chain id + sequence
//!     → encoding (sign bytes)
//!     → signing (r || s)
//!     → builder.rs ({msg, signatures, fee} in wire order)
//!     → base64(JSON) wire form
//! ```
//!
//! Transactions are rebuilt from scratch for every broadcast attempt and never persisted.

pub mod builder;
pub mod types;

pub use builder::{build_tx, TxBuilder, WireTx};
pub use types::{Fee, SignedTx, StdSignature, TxMsg, TypedValue};
