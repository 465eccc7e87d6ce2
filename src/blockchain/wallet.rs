//! Wallet management and transaction signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - The client only sees the [`TransactionSigner`] capability, so a
//!   hardware or remote signer can replace [`Wallet`] without touching
//!   call sites

use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use crate::blockchain::types::{ClientError, ClientResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CHAIN_CLIENT_PRIVATE_KEY";

/// Capability to sign transactions for a single account.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Sign a fully populated request and return the raw EIP-2718 payload.
    async fn sign_transaction(&self, tx: TransactionRequest) -> ClientResult<Bytes>;
}

/// Local in-memory key.
#[derive(Clone)]
pub struct Wallet {
    signer: EthereumWallet,
    address: Address,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    ///
    /// # Security
    /// The private key is never logged.
    pub fn from_private_key(private_key_hex: &str) -> ClientResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ClientError::Wallet(format!("Invalid private key format: {}", e)))?;
        let address = signer.address();

        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self {
            signer: EthereumWallet::from(signer),
            address,
        })
    }

    /// Load wallet from environment variable.
    ///
    /// Reads `CHAIN_CLIENT_PRIVATE_KEY` from environment.
    pub fn from_env() -> ClientResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            ClientError::Wallet(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl TransactionSigner for Wallet {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> ClientResult<Bytes> {
        let envelope = tx
            .with_from(self.address)
            .build(&self.signer)
            .await
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        Ok(envelope.encoded_2718().into())
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
