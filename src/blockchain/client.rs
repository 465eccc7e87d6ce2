//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint, optionally through an HTTP proxy
//! - Verify liveness and resolve the chain id before touching the key
//! - Query chain state (nonces, balances, receipts, ERC-20 reads)
//! - Sign and submit raw transactions through a [`TransactionSigner`]

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::sol_types::SolCall;
use alloy::transports::http::Http;
use alloy::transports::TransportResult;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::erc20::IERC20;
use crate::blockchain::nonce::NonceSequencer;
use crate::blockchain::types::{ChainId, ClientConfig, ClientError, ClientResult, NonceStrategy};
use crate::blockchain::units::{from_base_units, NATIVE_DECIMALS};
use crate::blockchain::wallet::{TransactionSigner, Wallet};
use crate::config::validation::normalize_proxy;
use crate::observability::metrics;

/// Client for one account on one chain.
#[derive(Clone)]
pub struct ChainClient {
    pub(crate) provider: DynProvider,
    pub(crate) signer: Arc<dyn TransactionSigner>,
    pub(crate) chain_id: ChainId,
    pub(crate) config: ClientConfig,
    pub(crate) nonces: Option<NonceSequencer>,
}

impl ChainClient {
    /// Connect and derive the account from a hex private key.
    ///
    /// The endpoint is checked before the key is parsed, so an unreachable
    /// node is reported as [`ClientError::Connection`] even for a bad key.
    pub async fn connect(config: ClientConfig, private_key: &str) -> ClientResult<Self> {
        let (provider, chain_id) = open_connection(&config).await?;
        let wallet = Wallet::from_private_key(private_key)?;
        Ok(Self::assemble(provider, Arc::new(wallet), chain_id, config))
    }

    /// Connect using an externally supplied signer.
    pub async fn with_signer(
        config: ClientConfig,
        signer: Arc<dyn TransactionSigner>,
    ) -> ClientResult<Self> {
        let (provider, chain_id) = open_connection(&config).await?;
        Ok(Self::assemble(provider, signer, chain_id, config))
    }

    fn assemble(
        provider: DynProvider,
        signer: Arc<dyn TransactionSigner>,
        chain_id: ChainId,
        config: ClientConfig,
    ) -> Self {
        let nonces = match config.nonce_strategy {
            NonceStrategy::Network => None,
            NonceStrategy::Sequenced => Some(NonceSequencer::new()),
        };

        tracing::info!(
            address = %signer.address(),
            chain_id = %chain_id,
            rpc_url = %config.rpc_url,
            proxy = config.proxy.as_deref().unwrap_or("none"),
            "Client initialized"
        );

        Self {
            provider,
            signer,
            chain_id,
            config,
            nonces,
        }
    }

    /// Address of the signing account.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Chain id resolved at construction.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub(crate) async fn rpc<T, F>(&self, method: &'static str, request: F) -> ClientResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        bounded(self.config.rpc_timeout_secs, method, request).await
    }

    /// Pending transaction count for `address`, or for the own account.
    pub async fn get_nonce(&self, address: Option<Address>) -> ClientResult<u64> {
        let address = address.unwrap_or_else(|| self.address());
        let nonce = self
            .rpc(
                "eth_getTransactionCount",
                self.provider.get_transaction_count(address).pending(),
            )
            .await
            .inspect_err(|e| tracing::warn!(address = %address, error = %e, "Failed to get nonce"))?;

        tracing::debug!(address = %address, nonce, "Fetched nonce");
        Ok(nonce)
    }

    /// Sign a fully populated request and submit it.
    ///
    /// The request must already carry nonce, gas limit, gas price and chain id.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> ClientResult<TxHash> {
        tracing::debug!(
            to = ?tx.to,
            nonce = ?tx.nonce,
            gas = ?tx.gas,
            gas_price = ?tx.gas_price,
            "Sending transaction"
        );

        let raw = self
            .signer
            .sign_transaction(tx)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to sign transaction"))?;

        let pending = self
            .rpc("eth_sendRawTransaction", self.provider.send_raw_transaction(&raw))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to submit transaction"))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Transaction sent");
        Ok(tx_hash)
    }

    /// Get a transaction receipt by hash; `None` while the transaction is pending.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ClientResult<Option<TransactionReceipt>> {
        tracing::debug!(tx_hash = %tx_hash, "Getting transaction receipt");
        self.rpc(
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
        .inspect_err(|e| tracing::warn!(tx_hash = %tx_hash, error = %e, "Failed to get receipt"))
    }

    /// Native balance in whole units (ether, not wei).
    pub async fn get_native_balance(&self, address: Option<Address>) -> ClientResult<f64> {
        let address = address.unwrap_or_else(|| self.address());
        let balance = async {
            let wei: U256 = self.rpc("eth_getBalance", self.provider.get_balance(address)).await?;
            from_base_units(wei, NATIVE_DECIMALS)
        }
        .await
        .inspect_err(|e| tracing::warn!(address = %address, error = %e, "Failed to get native balance"))?;

        tracing::debug!(address = %address, balance, "Fetched native balance");
        Ok(balance)
    }

    /// Read `decimals()` from a token contract.
    pub async fn get_decimals(&self, token: Address) -> ClientResult<u8> {
        let decimals = self
            .read_contract(token, IERC20::decimalsCall {})
            .await
            .inspect_err(|e| tracing::warn!(token = %token, error = %e, "Failed to get decimals"))?;

        tracing::debug!(token = %token, decimals, "Fetched token decimals");
        Ok(decimals)
    }

    /// Amount of `token` the own account lets `spender` move, in whole units.
    pub async fn get_allowance(&self, token: Address, spender: Address) -> ClientResult<f64> {
        let owner = self.address();
        let allowance = async {
            let decimals = self.get_decimals(token).await?;
            let raw = self
                .read_contract(token, IERC20::allowanceCall { owner, spender })
                .await?;
            from_base_units(raw, decimals)
        }
        .await
        .inspect_err(|e| {
            tracing::warn!(token = %token, spender = %spender, error = %e, "Failed to get allowance")
        })?;

        tracing::debug!(token = %token, spender = %spender, allowance, "Fetched allowance");
        Ok(allowance)
    }

    /// Token balance of `address` (default: own account), in whole units.
    pub async fn get_token_balance(
        &self,
        token: Address,
        address: Option<Address>,
    ) -> ClientResult<f64> {
        let owner = address.unwrap_or_else(|| self.address());
        let balance = async {
            let decimals = self.get_decimals(token).await?;
            let raw = self
                .read_contract(token, IERC20::balanceOfCall { owner })
                .await?;
            from_base_units(raw, decimals)
        }
        .await
        .inspect_err(|e| {
            tracing::warn!(token = %token, owner = %owner, error = %e, "Failed to get token balance")
        })?;

        tracing::debug!(token = %token, owner = %owner, balance, "Fetched token balance");
        Ok(balance)
    }

    async fn read_contract<C: SolCall>(&self, contract: Address, call: C) -> ClientResult<C::Return> {
        let request = TransactionRequest::default()
            .with_to(contract)
            .with_input(call.abi_encode());
        let output = self.rpc("eth_call", self.provider.call(request)).await?;
        Ok(C::abi_decode_returns(&output)?)
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .field("rpc_url", &self.config.rpc_url)
            .field("proxy", &self.config.proxy)
            .finish()
    }
}

async fn bounded<T, F>(timeout_secs: u64, method: &'static str, request: F) -> ClientResult<T>
where
    F: IntoFuture<Output = TransportResult<T>>,
{
    match timeout(Duration::from_secs(timeout_secs), request).await {
        Ok(Ok(value)) => {
            metrics::record_rpc(method, "ok");
            Ok(value)
        }
        Ok(Err(e)) => {
            metrics::record_rpc(method, "error");
            Err(e.into())
        }
        Err(_) => {
            metrics::record_rpc(method, "timeout");
            Err(ClientError::Timeout(timeout_secs))
        }
    }
}

fn build_provider(config: &ClientConfig) -> ClientResult<DynProvider> {
    let url: url::Url = config.rpc_url.parse().map_err(|e| {
        ClientError::InvalidInput(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
    })?;

    let mut http = reqwest::Client::builder();
    if let Some(proxy) = &config.proxy {
        let proxy = reqwest::Proxy::all(normalize_proxy(proxy))
            .map_err(|e| ClientError::InvalidInput(format!("Invalid proxy '{}': {}", proxy, e)))?;
        http = http.proxy(proxy);
    }
    let http = http
        .build()
        .map_err(|e| ClientError::Connection(format!("Failed to build HTTP client: {}", e)))?;

    let transport = Http::with_client(http, url);
    let client = RpcClient::new(transport, false);
    Ok(ProviderBuilder::new().connect_client(client).erased())
}

/// Build the provider, check liveness and resolve the chain id.
async fn open_connection(config: &ClientConfig) -> ClientResult<(DynProvider, ChainId)> {
    tracing::info!(
        rpc_url = %config.rpc_url,
        proxy = config.proxy.as_deref().unwrap_or("none"),
        "Connecting to RPC"
    );

    let provider = build_provider(config)?;
    let connection_failed = |e: ClientError| {
        tracing::error!(rpc_url = %config.rpc_url, error = %e, "Failed to connect to the RPC");
        ClientError::Connection(format!("Failed to connect to the RPC at {}: {}", config.rpc_url, e))
    };

    let version = bounded(
        config.rpc_timeout_secs,
        "web3_clientVersion",
        provider.get_client_version(),
    )
    .await
    .map_err(connection_failed)?;

    let chain_id = bounded(config.rpc_timeout_secs, "eth_chainId", provider.get_chain_id())
        .await
        .map_err(connection_failed)?;

    if let Some(expected) = config.expected_chain_id {
        if expected != chain_id {
            return Err(ClientError::ChainMismatch {
                expected,
                actual: chain_id,
            });
        }
    }

    tracing::debug!(client_version = %version, chain_id, "RPC reachable");
    Ok((provider, ChainId(chain_id)))
}
