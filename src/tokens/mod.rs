//! Static token table.
//!
//! Maps (chain, ticker) to a contract address and its published decimals.
//! The client never consults this table; callers use it to pick the
//! contract to pass in. Decimals here are informational only, the client
//! always reads them from the contract.

pub mod crosscurve;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

pub use crosscurve::UNIFIED_ROUTER_V2;

/// A token contract on a named chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub chain: String,
    pub ticker: String,
    pub address: Address,
    pub decimals: u8,
}

/// Lookup table of known tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: Vec<TokenDescriptor>,
}

impl TokenRegistry {
    /// Registry holding the built-in crosscurve table.
    pub fn builtin() -> Self {
        let tokens = crosscurve::CROSSCURVE_TOKENS
            .iter()
            .map(|&(chain, ticker, address, decimals)| TokenDescriptor {
                chain: chain.to_string(),
                ticker: ticker.to_string(),
                address,
                decimals,
            })
            .collect();
        Self { tokens }
    }

    /// Add entries; an entry for an existing (chain, ticker) replaces it.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = TokenDescriptor>) {
        for entry in entries {
            match self.position(&entry.chain, &entry.ticker) {
                Some(i) => self.tokens[i] = entry,
                None => self.tokens.push(entry),
            }
        }
    }

    /// Case-insensitive lookup by chain and ticker.
    pub fn find(&self, chain: &str, ticker: &str) -> Option<&TokenDescriptor> {
        self.position(chain, ticker).map(|i| &self.tokens[i])
    }

    /// All tokens on one chain, in table order.
    pub fn for_chain<'a>(&'a self, chain: &'a str) -> impl Iterator<Item = &'a TokenDescriptor> + 'a {
        self.tokens
            .iter()
            .filter(move |t| t.chain.eq_ignore_ascii_case(chain))
    }

    /// Distinct chain names, in table order.
    pub fn chains(&self) -> Vec<&str> {
        let mut chains: Vec<&str> = Vec::new();
        for token in &self.tokens {
            if !chains.contains(&token.chain.as_str()) {
                chains.push(&token.chain);
            }
        }
        chains
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn position(&self, chain: &str, ticker: &str) -> Option<usize> {
        self.tokens.iter().position(|t| {
            t.chain.eq_ignore_ascii_case(chain) && t.ticker.eq_ignore_ascii_case(ticker)
        })
    }
}
