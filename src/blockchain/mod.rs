//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! private key (argument or environment)
//!     → wallet.rs (key loading, signing behind TransactionSigner)
//!     → client.rs (RPC connection with timeouts, queries, raw submission)
//!     → transaction.rs (nonce, gas, scaling, build, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod erc20;
pub mod nonce;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use client::ChainClient;
pub use types::{ChainId, ClientError, ClientResult, ConfirmationStatus};
pub use units::{from_base_units, to_base_units};
pub use wallet::{TransactionSigner, Wallet};
