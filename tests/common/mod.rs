//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use tendersign::error::{ClientError, ClientResult};
use tendersign::keys::Secp256k1PrivateKey;
use tendersign::rpc::{BroadcastTxResponse, Rpc, TxOutcome};
use tendersign::tx::TxBuilder;

// Well-known development key; never holds real funds.
pub const TEST_RAW_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_CHAIN_ID: &str = "test-chain";

pub fn test_builder() -> TxBuilder {
    let key = Secp256k1PrivateKey::from_raw_hex(TEST_RAW_KEY).unwrap();
    TxBuilder::new(key, TEST_CHAIN_ID).unwrap()
}

pub fn committed(hash: &str, height: u64) -> BroadcastTxResponse {
    BroadcastTxResponse {
        check_tx: TxOutcome::ok(),
        deliver_tx: TxOutcome::ok(),
        hash: hash.to_string(),
        height,
    }
}

pub fn rejected(check: TxOutcome, deliver: TxOutcome) -> BroadcastTxResponse {
    BroadcastTxResponse {
        check_tx: check,
        deliver_tx: deliver,
        hash: String::new(),
        height: 0,
    }
}

/// In-memory node that replays scripted broadcast responses.
#[derive(Default)]
pub struct MockRpc {
    responses: Mutex<VecDeque<BroadcastTxResponse>>,
    submitted: Mutex<Vec<String>>,
    blocks: Mutex<HashMap<u64, Value>>,
    state: Mutex<HashMap<(String, String), Value>>,
}

impl MockRpc {
    pub fn scripted(responses: Vec<BroadcastTxResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        })
    }

    pub fn with_block(self: Arc<Self>, height: u64, block: Value) -> Arc<Self> {
        self.blocks.lock().unwrap().insert(height, block);
        self
    }

    pub fn with_state(self: Arc<Self>, path: &str, key: &str, value: Value) -> Arc<Self> {
        self.state
            .lock()
            .unwrap()
            .insert((path.to_string(), key.to_string()), value);
        self
    }

    /// Base64 transactions submitted so far, in order.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl Rpc for MockRpc {
    async fn query(&self, path: &str, key: &str) -> ClientResult<Value> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .get(&(path.to_string(), key.to_string()))
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn broadcast_tx_commit(&self, tx: &str) -> ClientResult<BroadcastTxResponse> {
        self.submitted.lock().unwrap().push(tx.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Rpc("no scripted response left".to_string()))
    }

    async fn block(&self, height: u64) -> ClientResult<Value> {
        self.blocks
            .lock()
            .unwrap()
            .get(&height)
            .cloned()
            .ok_or_else(|| ClientError::Rpc(format!("no block at height {}", height)))
    }
}

/// Read one HTTP request and return its body.
async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return String::new(),
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = end + 4;
            while buf.len() < body_start + content_length {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            return String::from_utf8_lossy(&buf[body_start..]).to_string();
        }
    }
}

/// Start a programmable JSON-RPC backend on an ephemeral port.
///
/// The handler receives each request body and returns `(status, body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request = read_request_body(&mut socket).await;
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
