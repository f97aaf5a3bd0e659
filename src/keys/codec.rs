//! Conversion between tagged-hex key strings and typed keys.

use crate::error::{ClientError, ClientResult};
use crate::keys::types::{
    decode_fixed, KeyAlgorithm, PrivateKey, PublicKey, Secp256k1PrivateKey, Secp256k1PublicKey,
};

/// Split a tagged key into its algorithm and raw hex, matching prefixes case-insensitively.
fn split_prefix<'a>(
    tagged: &'a str,
    prefix_of: fn(KeyAlgorithm) -> &'static str,
) -> ClientResult<(KeyAlgorithm, &'a str)> {
    for algo in KeyAlgorithm::ALL {
        let prefix = prefix_of(algo);
        if tagged.len() >= prefix.len()
            && tagged.is_char_boundary(prefix.len())
            && tagged[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return Ok((algo, &tagged[prefix.len()..]));
        }
    }
    Err(ClientError::UnknownKeyPrefix(tagged.to_string()))
}

/// Decode a tagged private key.
pub fn decode_priv_key(tagged: &str) -> ClientResult<PrivateKey> {
    let (algo, raw) = split_prefix(tagged, KeyAlgorithm::private_prefix)?;
    match algo {
        KeyAlgorithm::Secp256k1 => Ok(PrivateKey::Secp256k1(Secp256k1PrivateKey(
            decode_fixed::<32>(raw)?,
        ))),
        KeyAlgorithm::Ed25519 => Ok(PrivateKey::Ed25519(decode_fixed::<64>(raw)?)),
    }
}

/// Decode a tagged public key.
pub fn decode_pub_key(tagged: &str) -> ClientResult<PublicKey> {
    let (algo, raw) = split_prefix(tagged, KeyAlgorithm::public_prefix)?;
    match algo {
        KeyAlgorithm::Secp256k1 => Ok(PublicKey::Secp256k1(Secp256k1PublicKey(
            decode_fixed::<33>(raw)?,
        ))),
        KeyAlgorithm::Ed25519 => Ok(PublicKey::Ed25519(decode_fixed::<32>(raw)?)),
    }
}

/// Tag a raw secp256k1 private key. There is no ed25519 encoder.
pub fn encode_priv_key(raw: &str) -> ClientResult<String> {
    Ok(Secp256k1PrivateKey::from_raw_hex(raw)?.encode())
}

/// Tag a raw compressed secp256k1 public key. There is no ed25519 encoder.
pub fn encode_pub_key(raw: &str) -> ClientResult<String> {
    Ok(Secp256k1PublicKey::from_raw_hex(raw)?.encode())
}
