//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::tokens::TokenDescriptor;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// RPC connection and transaction settings.
    pub client: ClientConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Token entries appended to the built-in table.
    pub tokens: Vec<TokenDescriptor>,
}

/// How nonces are assigned to outgoing transactions.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NonceStrategy {
    /// Query the pending transaction count before every send.
    #[default]
    Network,
    /// Seed from the network once, then count locally.
    Sequenced,
}

/// Client connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Optional HTTP proxy, `host:port` or a full URL.
    pub proxy: Option<String>,

    /// Refuse to start if the node reports a different chain.
    pub expected_chain_id: Option<u64>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Gas price multiplier (1.0 = node price, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (0 disables the cap).
    pub max_gas_price_gwei: u64,

    /// Nonce assignment strategy.
    pub nonce_strategy: NonceStrategy,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            proxy: None,
            expected_chain_id: None,
            rpc_timeout_secs: 10,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 0,
            nonce_strategy: NonceStrategy::Network,
            receipt_poll_interval_ms: 2_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "chain_client=info".to_string(),
            json_logs: false,
        }
    }
}
