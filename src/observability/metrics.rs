//! Metrics collection.
//!
//! # Metrics
//! - `chain_client_rpc_requests_total` (counter): RPC calls by method, outcome
//! - `chain_client_transactions_submitted_total` (counter): sends by kind
//!
//! No recorder is installed here; without one the macros are no-ops.

use metrics::counter;

/// Record one RPC round trip.
pub fn record_rpc(method: &'static str, outcome: &'static str) {
    counter!("chain_client_rpc_requests_total", "method" => method, "outcome" => outcome)
        .increment(1);
}

/// Record a successfully submitted transaction.
pub fn record_submission(kind: &'static str) {
    counter!("chain_client_transactions_submitted_total", "kind" => kind).increment(1);
}
