//! Wire transaction types as read back from the node.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::keys::types::Secp256k1PublicKey;
use crate::signing::Signature;

/// Public key type tag in the wire format.
pub const PUB_KEY_TYPE: &str = "tendermint/PubKeySecp256k1";
/// Signature type tag in the wire format.
pub const SIGNATURE_TYPE: &str = "tendermint/SignatureSecp256k1";
/// Accounts are addressed by name, so the account number is always zero.
pub const ACCOUNT_NUMBER: &str = "0";

/// `{type, value}` pair carrying base64 of raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl TypedValue {
    pub fn decode_value(&self) -> ClientResult<Vec<u8>> {
        Ok(BASE64.decode(&self.value)?)
    }
}

/// One domain message inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxMsg {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

/// Signature entry of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: TypedValue,
    pub signature: TypedValue,
    pub account_number: String,
    pub sequence: String,
}

impl StdSignature {
    pub fn public_key(&self) -> ClientResult<Secp256k1PublicKey> {
        if self.pub_key.kind != PUB_KEY_TYPE {
            return Err(ClientError::InvalidKey(format!(
                "Unsupported public key type: {}",
                self.pub_key.kind
            )));
        }
        Secp256k1PublicKey::from_raw_hex(&hex::encode(self.pub_key.decode_value()?))
    }

    pub fn signature(&self) -> ClientResult<Signature> {
        Signature::from_hex(&hex::encode(self.signature.decode_value()?))
    }

    pub fn sequence(&self) -> ClientResult<u64> {
        self.sequence
            .parse()
            .map_err(|_| ClientError::Encoding(format!("Invalid sequence: {}", self.sequence)))
    }
}

/// Transaction fee. Always zero in this protocol generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Value>,
    pub gas: String,
}

/// A decoded signed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTx {
    pub msg: Vec<TxMsg>,
    pub signatures: Vec<StdSignature>,
    pub fee: Fee,
}

impl SignedTx {
    /// Decode `base64(JSON)` as produced by [`WireTx::encode`](crate::tx::WireTx::encode).
    pub fn decode(encoded: &str) -> ClientResult<Self> {
        let json = BASE64.decode(encoded.trim())?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Sequence of the first signature, if any.
    pub fn sequence(&self) -> Option<u64> {
        self.signatures.first().and_then(|s| s.sequence().ok())
    }
}
