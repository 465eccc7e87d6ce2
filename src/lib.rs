//! EVM wallet client: native transfers and ERC-20 operations over JSON-RPC.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod tokens;

pub use blockchain::{ChainClient, ClientError, ClientResult};
pub use config::{ClientConfig, Config};
pub use tokens::{TokenDescriptor, TokenRegistry};
