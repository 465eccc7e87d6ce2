//! Conversion between human-scale amounts and integer base units.
//!
//! Amounts are scaled through their shortest decimal representation, so
//! `1.5` at 6 decimals is exactly `1500000` and the smallest unit of an
//! 18-decimal token survives the trip. Digits finer than the token
//! precision are truncated.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::blockchain::types::{ClientError, ClientResult};

/// Decimals of the native currency (wei per ether).
pub const NATIVE_DECIMALS: u8 = 18;

/// Scale a human-readable amount to base units.
pub fn to_base_units(amount: f64, decimals: u8) -> ClientResult<U256> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ClientError::InvalidInput(format!(
            "amount must be a finite non-negative number, got {amount}"
        )));
    }

    // f64 Display never uses exponent notation; abs() turns -0.0 into "0".
    let repr = truncate_fraction(&amount.abs().to_string(), decimals);

    match parse_units(&repr, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(value)) => Err(ClientError::InvalidInput(format!(
            "amount {repr} scaled to a signed value {value}"
        ))),
        Err(e) => Err(ClientError::InvalidInput(format!(
            "cannot scale {repr} to {decimals} decimals: {e}"
        ))),
    }
}

/// Scale base units back to a human-readable amount.
///
/// Both inputs come from the chain, so an unusable precision is a
/// [`ClientError::Decode`].
pub fn from_base_units(value: U256, decimals: u8) -> ClientResult<f64> {
    let formatted = format_units(value, decimals).map_err(|e| {
        ClientError::Decode(format!("cannot format {value} with {decimals} decimals: {e}"))
    })?;
    formatted
        .parse::<f64>()
        .map_err(|e| ClientError::Decode(format!("cannot parse {formatted}: {e}")))
}

fn truncate_fraction(repr: &str, decimals: u8) -> String {
    match repr.split_once('.') {
        Some((whole, _)) if decimals == 0 => whole.to_string(),
        Some((whole, fraction)) if fraction.len() > decimals as usize => {
            format!("{}.{}", whole, &fraction[..decimals as usize])
        }
        _ => repr.to_string(),
    }
}
