//! ECDSA over secp256k1 with SHA-256 and RFC 6979 nonces.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as EcdsaSignature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::error::{ClientError, ClientResult};
use crate::keys::codec::{decode_priv_key, decode_pub_key};
use crate::keys::types::{Secp256k1PrivateKey, Secp256k1PublicKey};

/// Signature as `r || s`, each a 32-byte big-endian integer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; 64]);

impl Signature {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Parse 128 hex characters, any case.
    pub fn from_hex(s: &str) -> ClientResult<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| ClientError::Signature(format!("Invalid signature hex: {}", e)))?;
        let bytes: [u8; 64] = bytes.try_into().map_err(|b: Vec<u8>| {
            ClientError::Signature(format!("Expected 64 signature bytes, got {}", b.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.0[32..]
    }

    /// Uppercase hex of `r || s`.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// SHA-256 of the payload; this is what actually gets signed.
pub fn payload_hash(payload: &[u8]) -> [u8; 32] {
    Sha256::digest(payload).into()
}

/// Sign payload bytes with a typed key.
pub fn sign_with_key(payload: &[u8], key: &Secp256k1PrivateKey) -> ClientResult<Signature> {
    let signing_key = key.signing_key()?;
    let hash = payload_hash(payload);
    let sig: EcdsaSignature = signing_key
        .sign_prehash(&hash)
        .map_err(|e| ClientError::Signature(format!("Signing failed: {}", e)))?;

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&sig.to_bytes());
    Ok(Signature(bytes))
}

/// Sign payload bytes with a tagged private key.
pub fn sign(payload: &[u8], priv_tagged: &str) -> ClientResult<Signature> {
    let key = decode_priv_key(priv_tagged)?;
    sign_with_key(payload, key.as_secp256k1()?)
}

/// Check a signature against a typed public key.
///
/// A malformed or mismatching signature yields `Ok(false)`; only an unusable
/// public key is an error.
pub fn verify_with_key(
    payload: &[u8],
    key: &Secp256k1PublicKey,
    signature: &Signature,
) -> ClientResult<bool> {
    let verifying_key = VerifyingKey::from_sec1_bytes(key.as_bytes())
        .map_err(|e| ClientError::InvalidKey(format!("Not a secp256k1 point: {}", e)))?;
    let sig = match EcdsaSignature::from_slice(signature.as_bytes()) {
        Ok(sig) => sig,
        Err(e) => {
            tracing::debug!(error = %e, "Rejecting malformed signature");
            return Ok(false);
        }
    };
    let hash = payload_hash(payload);
    Ok(verifying_key.verify_prehash(&hash, &sig).is_ok())
}

/// Check a signature against a tagged public key.
pub fn verify(payload: &[u8], pub_tagged: &str, signature: &Signature) -> ClientResult<bool> {
    let key = decode_pub_key(pub_tagged)?;
    verify_with_key(payload, key.as_secp256k1()?, signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{derive_from_private, encode_priv_key, generate};

    const RAW_PRIV: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_priv() -> String {
        encode_priv_key(RAW_PRIV).unwrap()
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign(b"payload", &test_priv()).unwrap();
        let b = sign(b"payload", &test_priv()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, sign(b"other payload", &test_priv()).unwrap());
    }

    #[test]
    fn test_signature_layout() {
        let sig = sign(b"payload", &test_priv()).unwrap();
        assert_eq!(sig.to_hex().len(), 128);
        assert_eq!(sig.r().len(), 32);
        assert_eq!(sig.s().len(), 32);
        assert_eq!(Signature::from_hex(&sig.to_hex().to_lowercase()).unwrap(), sig);
    }

    #[test]
    fn test_sign_and_verify() {
        let priv_key = test_priv();
        let pub_key = derive_from_private(&priv_key).unwrap();
        let sig = sign(b"hello", &priv_key).unwrap();

        assert!(verify(b"hello", &pub_key, &sig).unwrap());
        assert!(!verify(b"hell0", &pub_key, &sig).unwrap());

        let other_pub = derive_from_private(&generate()).unwrap();
        assert!(!verify(b"hello", &other_pub, &sig).unwrap());
    }

    #[test]
    fn test_verify_malformed_signature_is_false() {
        let pub_key = derive_from_private(&test_priv()).unwrap();
        let zero = Signature::from_bytes([0u8; 64]);
        assert!(!verify(b"hello", &pub_key, &zero).unwrap());
    }

    #[test]
    fn test_sign_unknown_prefix() {
        let result = sign(b"x", RAW_PRIV);
        assert!(matches!(result, Err(ClientError::UnknownKeyPrefix(_))));
    }

    #[test]
    fn test_sign_rejects_ed25519() {
        let ed = format!("A328891240{}", "11".repeat(64));
        assert!(matches!(sign(b"x", &ed), Err(ClientError::InvalidKey(_))));
    }

    #[test]
    fn test_signature_from_hex_wrong_length() {
        assert!(matches!(Signature::from_hex("ABCD"), Err(ClientError::Signature(_))));
    }
}
