//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and value ranges (timeouts > 0, multiplier > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use crate::config::schema::{ClientConfig, Config};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a full configuration.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_client(&config.client);

    let mut seen = HashSet::new();
    for (i, token) in config.tokens.iter().enumerate() {
        if token.chain.trim().is_empty() || token.ticker.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("tokens[{}]", i),
                "chain and ticker must be non-empty",
            ));
        }
        let key = (token.chain.to_lowercase(), token.ticker.to_lowercase());
        if !seen.insert(key) {
            errors.push(ValidationError::new(
                format!("tokens[{}]", i),
                format!("duplicate entry for {} on {}", token.ticker, token.chain),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the client section on its own.
pub fn validate_client(client: &ClientConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match url::Url::parse(&client.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "client.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("client.rpc_url", e.to_string())),
    }

    if let Some(proxy) = &client.proxy {
        if let Err(e) = url::Url::parse(&normalize_proxy(proxy)) {
            errors.push(ValidationError::new("client.proxy", e.to_string()));
        }
    }

    if client.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("client.rpc_timeout_secs", "must be greater than 0"));
    }

    if !(client.gas_price_multiplier.is_finite() && client.gas_price_multiplier > 0.0) {
        errors.push(ValidationError::new(
            "client.gas_price_multiplier",
            "must be a positive number",
        ));
    }

    if client.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "client.receipt_poll_interval_ms",
            "must be greater than 0",
        ));
    }

    errors
}

/// Turn `host:port` into `http://host:port`; full URLs pass through.
pub fn normalize_proxy(proxy: &str) -> String {
    let proxy = proxy.trim();
    if proxy.contains("://") {
        proxy.to_string()
    } else {
        format!("http://{}", proxy)
    }
}
