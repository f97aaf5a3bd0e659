//! JSON-RPC client over HTTP with timeout and failover.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the primary endpoint, then failovers
//! - Unwrap `result` / `error` envelopes
//! - Decode `abci_query` values (base64 JSON)
//! - Provide a health probe for node connectivity

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::config::schema::RpcConfig;
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::rpc::types::BroadcastTxResponse;
use crate::rpc::Rpc;

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Node RPC client with failover support.
#[derive(Clone)]
pub struct HttpRpc {
    http: reqwest::Client,
    /// Primary endpoint followed by failovers.
    endpoints: Vec<Url>,
    config: RpcConfig,
    timeout_duration: Duration,
    next_id: Arc<AtomicU64>,
}

impl HttpRpc {
    /// Create a new client. Only the primary URL must parse; bad failovers are skipped.
    pub fn new(config: RpcConfig) -> ClientResult<Self> {
        let primary: Url = config
            .url
            .parse()
            .map_err(|e| ClientError::Rpc(format!("Invalid RPC URL '{}': {}", config.url, e)))?;
        let mut endpoints = vec![primary];

        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => endpoints.push(url),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        tracing::info!(
            rpc_url = %config.url,
            endpoints = endpoints.len(),
            timeout_secs = config.timeout_secs,
            "RPC client initialized"
        );

        Ok(Self {
            http: reqwest::Client::new(),
            endpoints,
            timeout_duration: Duration::from_secs(config.timeout_secs),
            config,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    async fn post(&self, endpoint: &Url, body: &Value) -> Result<JsonRpcResponse, reqwest::Error> {
        self.http
            .post(endpoint.clone())
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json::<JsonRpcResponse>()
            .await
    }

    /// Call a JSON-RPC method, trying each endpoint in order.
    ///
    /// Only transport failures fall through to the next endpoint. A JSON-RPC
    /// error object is an answer from the node and is returned immediately.
    pub async fn call(&self, method: &str, params: Value) -> ClientResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let mut all_timed_out = true;
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            match timeout(self.timeout_duration, self.post(endpoint, &body)).await {
                Ok(Ok(response)) => return unwrap_response(method, response),
                Ok(Err(e)) => {
                    all_timed_out = false;
                    tracing::warn!(endpoint_idx = i, method = method, error = %e, "RPC error, trying next endpoint");
                }
                Err(_) => {
                    tracing::warn!(endpoint_idx = i, method = method, "RPC timeout, trying next endpoint");
                }
            }
        }

        if all_timed_out {
            Err(ClientError::Timeout(self.config.timeout_secs))
        } else {
            Err(ClientError::Rpc(format!("All RPC endpoints failed for {}", method)))
        }
    }

    /// Check if the node is reachable.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.call("status", json!({})).await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }
}

fn unwrap_response(method: &str, response: JsonRpcResponse) -> ClientResult<Value> {
    if let Some(err) = response.error {
        let detail = match err.data {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        return Err(ClientError::Rpc(format!(
            "{} failed with code {}: {} {}",
            method, err.code, err.message, detail
        )
        .trim_end()
        .to_string()));
    }
    response
        .result
        .ok_or_else(|| ClientError::Rpc(format!("{} returned neither result nor error", method)))
}

/// Decode the `response` of an `abci_query` result into JSON.
fn decode_query_response(result: &Value) -> ClientResult<Value> {
    let response = &result["response"];
    let code = response["code"].as_u64().unwrap_or(0);
    if code != 0 {
        return Err(ClientError::Rpc(format!(
            "abci_query failed with code {}: {}",
            code,
            response["log"].as_str().unwrap_or("")
        )));
    }
    match response["value"].as_str() {
        None | Some("") => Ok(Value::Null),
        Some(encoded) => {
            let bytes = BASE64.decode(encoded)?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}

#[async_trait]
impl Rpc for HttpRpc {
    async fn query(&self, path: &str, key: &str) -> ClientResult<Value> {
        let params = json!({
            "path": path,
            "data": hex::encode(key.as_bytes()),
        });
        let result = self.call("abci_query", params).await?;
        decode_query_response(&result)
    }

    async fn broadcast_tx_commit(&self, tx: &str) -> ClientResult<BroadcastTxResponse> {
        let result = self.call("broadcast_tx_commit", json!({ "tx": tx })).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn block(&self, height: u64) -> ClientResult<Value> {
        self.call("block", json!({ "height": height.to_string() })).await
    }
}

impl std::fmt::Debug for HttpRpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRpc")
            .field("rpc_url", &self.config.url)
            .field("endpoints", &self.endpoints.len())
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RpcConfig {
        RpcConfig {
            url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_invalid_primary_url() {
        let mut config = test_config();
        config.url = "not a url".to_string();
        let err = HttpRpc::new(config).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[test]
    fn test_invalid_failover_skipped() {
        let mut config = test_config();
        config.failover_urls.push("::bad::".to_string());
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = HttpRpc::new(config).unwrap();
        assert_eq!(client.endpoints.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_endpoints_fail() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        let client = HttpRpc::new(config).unwrap();
        let result = client.block(1).await;
        assert!(result.is_err());
        assert!(!client.is_healthy().await);
    }

    #[test]
    fn test_unwrap_error_envelope() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32603,"message":"Internal error","data":"tx already exists in cache"}}"#,
        )
        .unwrap();
        let err = unwrap_response("broadcast_tx_commit", response).unwrap_err();
        assert!(err.to_string().contains("-32603"));
        assert!(err.to_string().contains("tx already exists"));
    }

    #[test]
    fn test_decode_query_response() {
        let encoded = BASE64.encode(br#"{"balance":{"amount":"500000"}}"#);
        let result = json!({"response": {"code": 0, "value": encoded}});
        assert_eq!(
            decode_query_response(&result).unwrap(),
            json!({"balance": {"amount": "500000"}})
        );

        let empty = json!({"response": {"code": 0, "value": null}});
        assert_eq!(decode_query_response(&empty).unwrap(), Value::Null);

        let failed = json!({"response": {"code": 1, "log": "not found"}});
        assert!(decode_query_response(&failed).unwrap_err().to_string().contains("not found"));
    }
}
