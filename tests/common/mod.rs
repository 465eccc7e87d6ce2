//! In-process JSON-RPC node for integration tests.
//!
//! Speaks just enough HTTP/1.1 for the alloy HTTP transport: one request
//! per connection, answered with `Connection: close`.

#![allow(dead_code)]

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{Address, Bloom, Bytes, B256, U256};
use alloy::sol_types::SolCall;
use chain_client::blockchain::erc20::IERC20;
use chain_client::ClientConfig;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Anvil's first account.
pub const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

pub const MINED_BLOCK: u64 = 16;

/// Chain state served by the mock node.
#[derive(Debug)]
pub struct NodeState {
    pub chain_id: u64,
    pub nonce: u64,
    pub balance_wei: U256,
    pub gas_price: u128,
    pub gas_estimate: u64,
    pub decimals: HashMap<Address, u8>,
    /// (token, spender) → allowance
    pub allowances: HashMap<(Address, Address), U256>,
    /// (token, owner) → balance
    pub token_balances: HashMap<(Address, Address), U256>,
    pub submitted: Vec<TxEnvelope>,
    pub receipts: HashMap<B256, Address>,
    /// Every method received, in order.
    pub calls: Vec<String>,
    /// Methods answered with a JSON-RPC error.
    pub failing_methods: HashSet<String>,
    /// Answer `decimals()` with empty return data.
    pub malformed_decimals: bool,
    /// Answer `eth_estimateGas` with an execution revert.
    pub revert_estimates: bool,
    /// Mine submitted transactions with `status: 0x0`.
    pub failed_receipts: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            chain_id: 31337,
            nonce: 0,
            balance_wei: U256::ZERO,
            gas_price: 1_000_000_000,
            gas_estimate: 21_000,
            decimals: HashMap::new(),
            allowances: HashMap::new(),
            token_balances: HashMap::new(),
            submitted: Vec::new(),
            receipts: HashMap::new(),
            calls: Vec::new(),
            failing_methods: HashSet::new(),
            malformed_decimals: false,
            revert_estimates: false,
            failed_receipts: false,
        }
    }
}

impl NodeState {
    pub fn call_count(&self, method: &str) -> usize {
        self.calls.iter().filter(|m| m.as_str() == method).count()
    }
}

pub struct MockNode {
    pub addr: SocketAddr,
    state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap()
    }

    /// Client config pointed at this node.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            rpc_url: self.url(),
            rpc_timeout_secs: 5,
            receipt_poll_interval_ms: 50,
            ..ClientConfig::default()
        }
    }
}

/// Start a mock node on an ephemeral port.
pub async fn start_mock_node(state: NodeState) -> MockNode {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(Mutex::new(state));
    let shared = state.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let state = shared.clone();
                    tokio::spawn(async move {
                        let _ = serve(socket, state).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockNode { addr, state }
}

/// Start a backend that answers every request with a fixed non-RPC body.
pub async fn start_static_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request_body(&mut socket).await;
                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
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

/// Start a backend that accepts connections and never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn serve(mut socket: TcpStream, state: Arc<Mutex<NodeState>>) -> std::io::Result<()> {
    let body = read_request_body(&mut socket).await?;
    let request: Value = serde_json::from_slice(&body)?;

    let response = match request {
        Value::Array(batch) => {
            Value::Array(batch.iter().map(|r| respond(&state, r)).collect())
        }
        single => respond(&state, &single),
    };

    let body = response.to_string();
    let response_str = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    socket.write_all(response_str.as_bytes()).await?;
    socket.shutdown().await
}

async fn read_request_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        let start = header_end + 4;
        while buf.len() < start + content_length {
            let n = socket.read(&mut chunk).await?;
            if n == 0 {
                return Err(std::io::ErrorKind::UnexpectedEof.into());
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        return Ok(buf[start..start + content_length].to_vec());
    }
}

fn respond(state: &Arc<Mutex<NodeState>>, request: &Value) -> Value {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    let mut state = state.lock().unwrap();

    match dispatch(&mut state, method, &request["params"]) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    }
}

type RpcReply = Result<Value, (i64, String)>;

fn quantity(value: u128) -> Value {
    json!(format!("0x{:x}", value))
}

fn word(value: U256) -> Value {
    json!(B256::from(value))
}

fn dispatch(state: &mut NodeState, method: &str, params: &Value) -> RpcReply {
    state.calls.push(method.to_string());

    if state.failing_methods.contains(method) {
        return Err((-32000, format!("{} unavailable", method)));
    }

    match method {
        "web3_clientVersion" => Ok(json!("mock-node/0.1.0")),
        "eth_chainId" => Ok(quantity(state.chain_id as u128)),
        "eth_getTransactionCount" => Ok(quantity(state.nonce as u128)),
        "eth_getBalance" => Ok(json!(state.balance_wei)),
        "eth_gasPrice" => Ok(quantity(state.gas_price)),
        "eth_estimateGas" => {
            if state.revert_estimates {
                Err((3, "execution reverted: ERC20: transfer amount exceeds balance".to_string()))
            } else {
                Ok(quantity(state.gas_estimate as u128))
            }
        }
        "eth_call" => contract_call(state, &params[0]),
        "eth_sendRawTransaction" => submit_raw(state, &params[0]),
        "eth_getTransactionReceipt" => receipt(state, &params[0]),
        other => Err((-32601, format!("method {} not found", other))),
    }
}

fn contract_call(state: &NodeState, call: &Value) -> RpcReply {
    let to: Address = call["to"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or((-32602, "missing to".to_string()))?;
    let input = call["input"]
        .as_str()
        .or_else(|| call["data"].as_str())
        .and_then(|s| alloy::hex::decode(s).ok())
        .ok_or((-32602, "missing input".to_string()))?;

    if input.len() < 4 {
        return Err((3, "execution reverted".to_string()));
    }
    let selector: [u8; 4] = input[..4].try_into().unwrap();

    if selector == IERC20::decimalsCall::SELECTOR {
        if state.malformed_decimals {
            return Ok(json!(Bytes::new()));
        }
        return match state.decimals.get(&to) {
            Some(d) => Ok(word(U256::from(*d))),
            None => Err((3, "execution reverted".to_string())),
        };
    }

    if selector == IERC20::allowanceCall::SELECTOR {
        let decoded =
            IERC20::allowanceCall::abi_decode(&input).map_err(|e| (-32602, e.to_string()))?;
        let value = state
            .allowances
            .get(&(to, decoded.spender))
            .copied()
            .unwrap_or_default();
        return Ok(word(value));
    }

    if selector == IERC20::balanceOfCall::SELECTOR {
        let decoded =
            IERC20::balanceOfCall::abi_decode(&input).map_err(|e| (-32602, e.to_string()))?;
        let value = state
            .token_balances
            .get(&(to, decoded.owner))
            .copied()
            .unwrap_or_default();
        return Ok(word(value));
    }

    Err((3, "execution reverted: unknown selector".to_string()))
}

fn submit_raw(state: &mut NodeState, raw: &Value) -> RpcReply {
    let raw = raw
        .as_str()
        .and_then(|s| alloy::hex::decode(s).ok())
        .ok_or((-32602, "invalid raw transaction".to_string()))?;
    let envelope = TxEnvelope::decode_2718(&mut raw.as_slice())
        .map_err(|e| (-32602, format!("rlp: {}", e)))?;

    if envelope.nonce() != state.nonce {
        return Err((-32000, format!("nonce too low: expected {}", state.nonce)));
    }
    if envelope.chain_id() != Some(state.chain_id) {
        return Err((-32000, "invalid chain id".to_string()));
    }

    let to = envelope.to().unwrap_or_default();
    let input = envelope.input().clone();
    if input.starts_with(&IERC20::approveCall::SELECTOR) {
        if let Ok(call) = IERC20::approveCall::abi_decode(&input) {
            state.allowances.insert((to, call.spender), call.amount);
        }
    }

    let tx_hash = *envelope.tx_hash();
    state.nonce += 1;
    state.receipts.insert(tx_hash, to);
    state.submitted.push(envelope);
    Ok(json!(tx_hash))
}

fn receipt(state: &NodeState, hash: &Value) -> RpcReply {
    let hash: B256 = hash
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or((-32602, "invalid hash".to_string()))?;

    let Some(to) = state.receipts.get(&hash) else {
        return Ok(Value::Null);
    };
    let status = if state.failed_receipts { "0x0" } else { "0x1" };

    Ok(json!({
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": B256::with_last_byte(1),
        "blockNumber": quantity(MINED_BLOCK as u128),
        "from": TEST_ADDRESS,
        "to": to,
        "cumulativeGasUsed": quantity(state.gas_estimate as u128),
        "gasUsed": quantity(state.gas_estimate as u128),
        "effectiveGasPrice": quantity(state.gas_price),
        "contractAddress": null,
        "logs": [],
        "logsBloom": Bloom::default(),
        "type": "0x0",
        "status": status
    }))
}
