//! The signed payload envelope.

use serde_json::Value;

use crate::encoding::canonical::canonicalize;
use crate::encoding::value::CanonicalValue;
use crate::error::ClientResult;

/// The zero fee every transaction carries: `{"amount":[],"gas":"0"}`.
pub fn zero_fee() -> CanonicalValue {
    CanonicalValue::object([
        ("amount", CanonicalValue::Array(Vec::new())),
        ("gas", CanonicalValue::str("0")),
    ])
}

/// Wrap a domain message as `{"type": msg_type, "value": canonical(msg)}`.
pub fn typed_msg(msg_type: &str, msg: &Value) -> CanonicalValue {
    CanonicalValue::object([
        ("type", CanonicalValue::str(msg_type)),
        ("value", canonicalize(msg)),
    ])
}

/// Everything that goes into the signed bytes.
#[derive(Debug, Clone)]
pub struct SignPayload<'a> {
    pub chain_id: &'a str,
    pub sequence: u64,
    pub memo: &'a str,
    pub msg_type: &'a str,
    pub msgs: &'a [Value],
}

impl SignPayload<'_> {
    /// `{chain_id, fee, memo, msgs, sequence}` in canonical form.
    pub fn to_canonical(&self) -> CanonicalValue {
        CanonicalValue::object([
            ("chain_id", CanonicalValue::str(self.chain_id)),
            ("fee", zero_fee()),
            ("memo", CanonicalValue::str(self.memo)),
            (
                "msgs",
                CanonicalValue::Array(
                    self.msgs
                        .iter()
                        .map(|m| typed_msg(self.msg_type, m))
                        .collect(),
                ),
            ),
            ("sequence", CanonicalValue::Str(self.sequence.to_string())),
        ])
    }

    /// UTF-8 bytes that get hashed and signed.
    pub fn to_sign_bytes(&self) -> ClientResult<Vec<u8>> {
        self.to_canonical().to_json_bytes()
    }
}

/// Convenience wrapper over [`SignPayload::to_sign_bytes`].
pub fn to_sign_bytes(
    chain_id: &str,
    sequence: u64,
    memo: &str,
    msg_type: &str,
    msgs: &[Value],
) -> ClientResult<Vec<u8>> {
    SignPayload {
        chain_id,
        sequence,
        memo,
        msg_type,
        msgs,
    }
    .to_sign_bytes()
}
