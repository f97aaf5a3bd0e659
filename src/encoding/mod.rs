//! Canonical encoding subsystem.
//!
//! # Data Flow
//! ```text
//! domain message (serde_json::Value)
//!     → canonical.rs (numbers to strings, key sort, amount scaling)
//!     → value.rs (CanonicalValue tree, ordered serializer)
//!     → sign_bytes.rs (chain id / fee / memo / sequence envelope)
//!     → compact UTF-8 JSON bytes
//! ```
//!
//! # Invariants
//! - Logically equal inputs produce byte-identical output
//! - Only objects shaped exactly `{"amount": <number-like>}` are rescaled
//! - `null` is never turned into a string

pub mod amount;
pub mod canonical;
pub mod sign_bytes;
pub mod value;

pub use canonical::{canonicalize, decode_amounts};
pub use sign_bytes::{to_sign_bytes, typed_msg, zero_fee, SignPayload};
pub use value::CanonicalValue;
