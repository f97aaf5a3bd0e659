//! Key management subsystem.
//!
//! # Data Flow
//! ```text
//! tagged hex string ("E1B0F79B20" + raw hex)
//!     → codec.rs (prefix table lookup, hex decode, length check)
//!     → types.rs (PrivateKey / PublicKey sum types)
//!     → derive.rs (public point, ownership check, seeded derivation)
//! ```
//!
//! # Security Constraints
//! - Private keys are never logged; their `Debug` output is redacted
//! - Only secp256k1 keys can be encoded; ed25519 is decode-only
//! - Decode failures always carry the offending input

pub mod codec;
pub mod derive;
pub mod types;

pub use codec::{decode_priv_key, decode_pub_key, encode_priv_key, encode_pub_key};
pub use derive::{derive, derive_from_private, generate, keys_match};
pub use types::{KeyAlgorithm, PrivateKey, PublicKey, Secp256k1PrivateKey, Secp256k1PublicKey};
