//! Typed key material and the prefix tables for the tagged-hex wire form.
//!
//! A tagged key is `PREFIX || HEX(raw)` where `PREFIX` is ten hex characters:
//! a four-byte algorithm identifier followed by the raw key length.

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the tagged private key used by the CLI.
pub const PRIVATE_KEY_ENV_VAR: &str = "TENDERSIGN_PRIVATE_KEY";

/// Private-key type prefix for secp256k1.
pub const SECP256K1_PRIV_PREFIX: &str = "E1B0F79B20";
/// Private-key type prefix for ed25519.
pub const ED25519_PRIV_PREFIX: &str = "A328891240";
/// Public-key type prefix for secp256k1 (compressed point).
pub const SECP256K1_PUB_PREFIX: &str = "EB5AE98721";
/// Public-key type prefix for ed25519.
pub const ED25519_PUB_PREFIX: &str = "1624DE6420";

/// Signature algorithm a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Secp256k1,
    Ed25519,
}

impl KeyAlgorithm {
    pub const ALL: [KeyAlgorithm; 2] = [KeyAlgorithm::Secp256k1, KeyAlgorithm::Ed25519];

    pub const fn private_prefix(self) -> &'static str {
        match self {
            KeyAlgorithm::Secp256k1 => SECP256K1_PRIV_PREFIX,
            KeyAlgorithm::Ed25519 => ED25519_PRIV_PREFIX,
        }
    }

    pub const fn public_prefix(self) -> &'static str {
        match self {
            KeyAlgorithm::Secp256k1 => SECP256K1_PUB_PREFIX,
            KeyAlgorithm::Ed25519 => ED25519_PUB_PREFIX,
        }
    }

    /// Raw private key length in bytes.
    pub const fn private_len(self) -> usize {
        match self {
            KeyAlgorithm::Secp256k1 => 32,
            KeyAlgorithm::Ed25519 => 64,
        }
    }

    /// Raw public key length in bytes.
    pub const fn public_len(self) -> usize {
        match self {
            KeyAlgorithm::Secp256k1 => 33,
            KeyAlgorithm::Ed25519 => 32,
        }
    }
}

/// A secp256k1 private scalar. The only private key type that can be encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct Secp256k1PrivateKey(pub(crate) [u8; 32]);

/// A compressed secp256k1 public point. The only public key type that can be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secp256k1PublicKey(pub(crate) [u8; 33]);

/// Decoded private key.
#[derive(Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Secp256k1(Secp256k1PrivateKey),
    Ed25519([u8; 64]),
}

/// Decoded public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Secp256k1(Secp256k1PublicKey),
    Ed25519([u8; 32]),
}

impl Secp256k1PrivateKey {
    /// Parse raw (untagged) hex.
    pub fn from_raw_hex(raw: &str) -> ClientResult<Self> {
        let bytes = decode_fixed::<32>(raw)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Uppercase raw hex, without prefix.
    pub fn raw_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Tagged form: secp256k1 prefix followed by the raw hex, uppercase.
    pub fn encode(&self) -> String {
        format!("{}{}", SECP256K1_PRIV_PREFIX, self.raw_hex())
    }
}

impl std::fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secp256k1PrivateKey(<redacted>)")
    }
}

impl Secp256k1PublicKey {
    pub fn from_raw_hex(raw: &str) -> ClientResult<Self> {
        let bytes = decode_fixed::<33>(raw)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    pub fn raw_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn encode(&self) -> String {
        format!("{}{}", SECP256K1_PUB_PREFIX, self.raw_hex())
    }
}

impl PrivateKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PrivateKey::Secp256k1(_) => KeyAlgorithm::Secp256k1,
            PrivateKey::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            PrivateKey::Secp256k1(k) => &k.0,
            PrivateKey::Ed25519(k) => k,
        }
    }

    pub fn raw_hex(&self) -> String {
        hex::encode_upper(self.raw_bytes())
    }

    /// The secp256k1 key, or `InvalidKey` for any other algorithm.
    pub fn as_secp256k1(&self) -> ClientResult<&Secp256k1PrivateKey> {
        match self {
            PrivateKey::Secp256k1(k) => Ok(k),
            PrivateKey::Ed25519(_) => Err(ClientError::InvalidKey(
                "ed25519 private keys are not supported for signing".to_string(),
            )),
        }
    }

    /// Load a tagged private key from `TENDERSIGN_PRIVATE_KEY`.
    pub fn from_env() -> ClientResult<Self> {
        let tagged = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            ClientError::InvalidKey(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;
        crate::keys::codec::decode_priv_key(&tagged)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({:?}, <redacted>)", self.algorithm())
    }
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            PublicKey::Secp256k1(_) => KeyAlgorithm::Secp256k1,
            PublicKey::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Secp256k1(k) => &k.0,
            PublicKey::Ed25519(k) => k,
        }
    }

    pub fn raw_hex(&self) -> String {
        hex::encode_upper(self.raw_bytes())
    }

    pub fn as_secp256k1(&self) -> ClientResult<&Secp256k1PublicKey> {
        match self {
            PublicKey::Secp256k1(k) => Ok(k),
            PublicKey::Ed25519(_) => Err(ClientError::InvalidKey(
                "ed25519 public keys are not supported for verification".to_string(),
            )),
        }
    }
}

/// Decode hex into exactly `N` bytes. Wrong lengths are rejected, never truncated.
pub(crate) fn decode_fixed<const N: usize>(raw: &str) -> ClientResult<[u8; N]> {
    let bytes = hex::decode(raw)
        .map_err(|e| ClientError::InvalidKey(format!("Invalid hex '{}': {}", raw, e)))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        ClientError::InvalidKey(format!(
            "Expected {} bytes of key material, got {} in '{}'",
            N,
            b.len(),
            raw
        ))
    })
}
