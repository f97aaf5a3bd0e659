//! Key derivation and ownership checks on secp256k1.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::error::{ClientError, ClientResult};
use crate::keys::codec::{decode_priv_key, decode_pub_key};
use crate::keys::types::{Secp256k1PrivateKey, Secp256k1PublicKey};

impl Secp256k1PrivateKey {
    pub(crate) fn signing_key(&self) -> ClientResult<SigningKey> {
        SigningKey::from_bytes((&self.0).into())
            .map_err(|e| ClientError::InvalidKey(format!("Not a valid secp256k1 scalar: {}", e)))
    }

    /// Compressed public point for this scalar.
    pub fn public_key(&self) -> ClientResult<Secp256k1PublicKey> {
        let signing_key = self.signing_key()?;
        Ok(public_from_signing_key(&signing_key))
    }

    fn from_signing_key(key: &SigningKey) -> Self {
        Self(key.to_bytes().into())
    }
}

fn public_from_signing_key(key: &SigningKey) -> Secp256k1PublicKey {
    let point = key.verifying_key().to_encoded_point(true);
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(point.as_bytes());
    Secp256k1PublicKey(bytes)
}

/// Derive the tagged public key that belongs to a tagged private key.
pub fn derive_from_private(priv_tagged: &str) -> ClientResult<String> {
    let key = decode_priv_key(priv_tagged)?;
    Ok(key.as_secp256k1()?.public_key()?.encode())
}

/// Whether the private key controls the public key, compared as uppercase hex.
pub fn keys_match(priv_tagged: &str, pub_tagged: &str) -> ClientResult<bool> {
    let derived = derive_from_private(priv_tagged)?;
    // Validates the prefix of the candidate; the comparison itself is textual.
    decode_pub_key(pub_tagged)?;
    Ok(derived == pub_tagged.to_ascii_uppercase())
}

/// Deterministically derive a new private key from a tagged seed key.
///
/// The seed string is uppercased before hashing, matching the case-insensitive
/// key decoding, so `E1B0...` and `e1b0...` derive the same key.
/// `SHA256(uppercased seed)` seeds a ChaCha20 stream that drives scalar
/// generation, so the output is fixed for a given seed across builds.
pub fn derive(seed_tagged: &str) -> ClientResult<String> {
    decode_priv_key(seed_tagged)?;
    let entropy: [u8; 32] = Sha256::digest(seed_tagged.to_ascii_uppercase().as_bytes()).into();
    let mut rng = ChaCha20Rng::from_seed(entropy);
    let signing_key = SigningKey::random(&mut rng);
    Ok(Secp256k1PrivateKey::from_signing_key(&signing_key).encode())
}

/// Generate a fresh private key from operating-system randomness.
pub fn generate() -> String {
    let signing_key = SigningKey::random(&mut OsRng);
    Secp256k1PrivateKey::from_signing_key(&signing_key).encode()
}
