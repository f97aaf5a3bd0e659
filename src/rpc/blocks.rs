//! Reading node state and committed transactions back into coin units.

use serde_json::Value;

use crate::encoding::decode_amounts;
use crate::error::{ClientError, ClientResult};
use crate::rpc::Rpc;
use crate::tx::SignedTx;

/// Query application state and undo amount scaling on the result.
pub async fn query_decoded<R: Rpc + ?Sized>(rpc: &R, path: &str, key: &str) -> ClientResult<Value> {
    Ok(decode_amounts(rpc.query(path, key).await?))
}

/// Decode every transaction committed in the block at `height`.
///
/// Message values have their amounts converted back to coin units.
pub async fn block_txs<R: Rpc + ?Sized>(rpc: &R, height: u64) -> ClientResult<Vec<SignedTx>> {
    let block = rpc.block(height).await?;
    let txs = match &block["block"]["data"]["txs"] {
        Value::Null => return Ok(Vec::new()),
        Value::Array(txs) => txs,
        other => {
            return Err(ClientError::Encoding(format!(
                "Unexpected txs field in block {}: {}",
                height, other
            )))
        }
    };

    txs.iter()
        .map(|raw| {
            let encoded = raw.as_str().ok_or_else(|| {
                ClientError::Encoding(format!("Non-string transaction in block {}", height))
            })?;
            let mut tx = SignedTx::decode(encoded)?;
            for msg in &mut tx.msg {
                msg.value = decode_amounts(std::mem::take(&mut msg.value));
            }
            Ok(tx)
        })
        .collect()
}
