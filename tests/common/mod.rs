//! Shared fixtures for settlement integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::TxHash;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use score_settlement::blockchain::{BlockchainError, BlockchainResult, MintCall, MintSubmitter};
use score_settlement::config::env;
use score_settlement::SettlementEnv;

pub const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
// Anvil's first account
pub const SERVER_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SERVER_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
/// Hash the canned node hands back for every sent transaction.
pub const CANNED_TX_HASH: &str =
    "0x7d3c0b1a9e8f6d5c4b3a29180f1e2d3c4b5a69788f9e0d1c2b3a495867788990";

/// A complete, valid set of settlement variables.
pub fn valid_vars() -> HashMap<String, String> {
    [
        (env::THIRDWEB_SECRET_KEY, "tw-test-secret"),
        (env::SERVER_WALLET, SERVER_KEY),
        (env::SCORE_TOKEN_CONTRACT, CONTRACT),
        (env::RECIPIENT_WALLET, RECIPIENT),
        (env::SCORE_AMOUNT, "100"),
        (env::NETWORK, "monad-testnet"),
        (env::ISSUE_NUMBER, "12"),
        (env::REPO_NAME, "org/repo"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn env_of(vars: &HashMap<String, String>) -> SettlementEnv {
    SettlementEnv::from_lookup(|key| vars.get(key).cloned())
}

/// Submitter that returns a fixed hash (or a fixed error) and counts calls.
pub struct MockSubmitter {
    pub tx_hash: TxHash,
    pub error: Option<String>,
    pub calls: AtomicU32,
}

impl MockSubmitter {
    pub fn returning(tx_hash: TxHash) -> Self {
        Self {
            tx_hash,
            error: None,
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            tx_hash: TxHash::ZERO,
            error: Some(message.to_string()),
            calls: AtomicU32::new(0),
        }
    }
}

impl MintSubmitter for MockSubmitter {
    async fn submit_mint(&self, _call: &MintCall) -> BlockchainResult<TxHash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(message) => Err(BlockchainError::Reverted(message.clone())),
            None => Ok(self.tx_hash),
        }
    }
}

/// One JSON-RPC call seen by a canned node, with the HTTP head it arrived under.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Request line and headers, lowercased.
    pub head: String,
    pub method: String,
}

pub type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

/// Methods received so far, in arrival order.
pub fn methods(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().iter().map(|c| c.method.clone()).collect()
}

/// Start a JSON-RPC node on an ephemeral port.
///
/// `handler` maps a method and its params to the `result` value. Every
/// connection serves one request and is closed. Returns the node URL and
/// the log of calls received.
pub async fn start_json_rpc_backend<F>(handler: F) -> (String, CallLog)
where
    F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let calls = log.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let handler = handler.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                let Some((head, body)) = read_request(&mut socket).await else {
                    return;
                };
                let Ok(request) = serde_json::from_slice::<Value>(&body) else {
                    return;
                };

                let reply = match &request {
                    Value::Array(batch) => Value::Array(
                        batch
                            .iter()
                            .map(|r| answer(r, &head, handler.as_ref(), &calls))
                            .collect(),
                    ),
                    single => answer(single, &head, handler.as_ref(), &calls),
                };

                let body = reply.to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (url, log)
}

fn answer<F>(request: &Value, head: &str, handler: &F, calls: &Mutex<Vec<RecordedCall>>) -> Value
where
    F: Fn(&str, &Value) -> Value,
{
    let method = request["method"].as_str().unwrap_or_default();
    calls.lock().unwrap().push(RecordedCall {
        head: head.to_string(),
        method: method.to_string(),
    });
    json!({
        "jsonrpc": "2.0",
        "id": request["id"].clone(),
        "result": handler(method, &request["params"]),
    })
}

async fn read_request(socket: &mut TcpStream) -> Option<(String, Vec<u8>)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < head_end + length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some((head, buf[head_end..head_end + length].to_vec()))
}

/// Answers for a Monad node that accepts every transaction and reports
/// `receipt_status` (`"0x1"` mined, `"0x0"` reverted) in the receipt.
pub fn canned_node(method: &str, receipt_status: &str) -> Value {
    match method {
        "eth_chainId" => json!("0xa1ee"),
        "eth_blockNumber" => json!("0x1"),
        "eth_getTransactionCount" => json!("0x0"),
        "eth_estimateGas" => json!("0x186a0"),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => json!("0x3b9aca00"),
        "eth_feeHistory" => json!({
            "oldestBlock": "0x1",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]],
        }),
        "eth_sendRawTransaction" => json!(CANNED_TX_HASH),
        "eth_getTransactionReceipt" => receipt_json(CANNED_TX_HASH, receipt_status),
        _ => Value::Null,
    }
}

/// EIP-1559 receipt for a call from the server wallet to the token contract.
pub fn receipt_json(tx_hash: &str, status: &str) -> Value {
    json!({
        "type": "0x2",
        "status": status,
        "cumulativeGasUsed": "0x186a0",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "ab".repeat(32)),
        "blockNumber": "0x1",
        "gasUsed": "0x186a0",
        "effectiveGasPrice": "0x77359400",
        "from": SERVER_ADDRESS,
        "to": CONTRACT,
        "contractAddress": null,
    })
}
