//! Transaction signing subsystem.
//!
//! # Data Flow
//! ```text
//! canonical sign bytes
//!     → SHA-256
//!     → ECDSA secp256k1, RFC 6979 deterministic nonce, low-S
//!     → r || s (64 bytes, hex)
//! ```

pub mod signer;

pub use signer::{payload_hash, sign, sign_with_key, verify, verify_with_key, Signature};
