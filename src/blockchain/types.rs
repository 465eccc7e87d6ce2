//! Chain-specific types and error definitions.

use alloy::rpc::json_rpc::RpcError;
use alloy::transports::TransportError;
use thiserror::Error;

// Re-export ClientConfig from config module to avoid duplication
pub use crate::config::schema::{ClientConfig, NonceStrategy};

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JSON-RPC error code geth and anvil use for execution reverts.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Errors that can occur during client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint unreachable or failed its liveness check at construction.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Network or transport failure on an established connection.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Execution reverted, either during estimation or in a call.
    #[error("Execution reverted: {0}")]
    Reverted(String),

    /// The node answered with data that could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Caller supplied an address, amount or URL that is not usable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction could not be signed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Transaction was not mined within the allotted time.
    #[error("Transaction not mined after {0} seconds")]
    ConfirmationTimeout(u64),
}

impl ClientError {
    /// Whether the failure came from the network rather than the caller or the contract.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Connection(_) | ClientError::Transport(_) | ClientError::Timeout(_)
        )
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match &err {
            RpcError::ErrorResp(payload) => {
                let message = payload.message.to_string();
                if payload.code == EXECUTION_REVERTED_CODE
                    || message.to_lowercase().contains("revert")
                {
                    ClientError::Reverted(message)
                } else {
                    ClientError::Rpc {
                        code: payload.code,
                        message,
                    }
                }
            }
            RpcError::DeserError { .. } | RpcError::NullResp => {
                ClientError::Decode(err.to_string())
            }
            _ => ClientError::Transport(err.to_string()),
        }
    }
}

impl From<alloy::sol_types::Error> for ClientError {
    fn from(err: alloy::sol_types::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is still pending in the mempool.
    Pending,
    /// Transaction has been mined successfully.
    Confirmed { block_number: u64 },
    /// Transaction was mined but reverted.
    Failed(String),
}
