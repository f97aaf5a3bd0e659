//! Signed envelope assembly.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use serde_json::Value;

use crate::encoding::{typed_msg, zero_fee, CanonicalValue, SignPayload};
use crate::error::ClientResult;
use crate::keys::types::{Secp256k1PrivateKey, Secp256k1PublicKey};
use crate::signing::{sign_with_key, Signature};
use crate::tx::types::{StdSignature, TypedValue, ACCOUNT_NUMBER, PUB_KEY_TYPE, SIGNATURE_TYPE};

/// Envelope fields serialize in declaration order; only message values are canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireBody {
    msg: Vec<CanonicalValue>,
    signatures: Vec<StdSignature>,
    fee: CanonicalValue,
}

/// A signed transaction ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTx {
    body: WireBody,
    sequence: u64,
}

impl WireTx {
    /// Compact JSON of the transaction, `{"msg":..,"signatures":..,"fee":..}`.
    pub fn to_json(&self) -> ClientResult<String> {
        Ok(serde_json::to_string(&self.body)?)
    }

    /// `base64(JSON)`, the form the broadcast endpoint accepts.
    pub fn encode(&self) -> ClientResult<String> {
        Ok(BASE64.encode(serde_json::to_vec(&self.body)?))
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

fn typed_bytes(kind: &str, bytes: &[u8]) -> TypedValue {
    TypedValue {
        kind: kind.to_string(),
        value: BASE64.encode(bytes),
    }
}

/// Assemble the wire transaction from messages and an existing signature.
pub fn build_tx(
    msgs: &[Value],
    msg_type: &str,
    pub_key: &Secp256k1PublicKey,
    signature: &Signature,
    sequence: u64,
) -> WireTx {
    let signature_entry = StdSignature {
        pub_key: typed_bytes(PUB_KEY_TYPE, pub_key.as_bytes()),
        signature: typed_bytes(SIGNATURE_TYPE, signature.as_bytes()),
        account_number: ACCOUNT_NUMBER.to_string(),
        sequence: sequence.to_string(),
    };

    let body = WireBody {
        msg: msgs.iter().map(|m| typed_msg(msg_type, m)).collect(),
        signatures: vec![signature_entry],
        fee: zero_fee(),
    };

    WireTx { body, sequence }
}

/// Signs and assembles transactions for a single account on a single chain.
#[derive(Clone)]
pub struct TxBuilder {
    key: Secp256k1PrivateKey,
    pub_key: Secp256k1PublicKey,
    chain_id: String,
    memo: String,
}

impl TxBuilder {
    /// Create a builder. Fails if the key is not a valid secp256k1 scalar.
    pub fn new(key: Secp256k1PrivateKey, chain_id: impl Into<String>) -> ClientResult<Self> {
        let pub_key = key.public_key()?;
        Ok(Self {
            key,
            pub_key,
            chain_id: chain_id.into(),
            memo: String::new(),
        })
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn public_key(&self) -> &Secp256k1PublicKey {
        &self.pub_key
    }

    /// Canonical bytes that get signed for these messages at `sequence`.
    pub fn sign_bytes(&self, msg_type: &str, msgs: &[Value], sequence: u64) -> ClientResult<Vec<u8>> {
        SignPayload {
            chain_id: &self.chain_id,
            sequence,
            memo: &self.memo,
            msg_type,
            msgs,
        }
        .to_sign_bytes()
    }

    /// Sign the canonical bytes for these messages at `sequence`.
    pub fn sign(&self, msg_type: &str, msgs: &[Value], sequence: u64) -> ClientResult<Signature> {
        let bytes = self.sign_bytes(msg_type, msgs, sequence)?;
        sign_with_key(&bytes, &self.key)
    }

    /// Sign and assemble a transaction from scratch.
    pub fn build(&self, msg_type: &str, msgs: &[Value], sequence: u64) -> ClientResult<WireTx> {
        let signature = self.sign(msg_type, msgs, sequence)?;
        tracing::debug!(
            chain_id = %self.chain_id,
            msg_type = msg_type,
            sequence = sequence,
            "Transaction signed"
        );
        Ok(build_tx(msgs, msg_type, &self.pub_key, &signature, sequence))
    }
}

impl std::fmt::Debug for TxBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxBuilder")
            .field("pub_key", &self.pub_key.encode())
            .field("chain_id", &self.chain_id)
            .field("memo", &self.memo)
            .finish()
    }
}
