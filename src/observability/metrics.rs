//! Metrics collection.
//!
//! # Metrics
//! - `chain_rpc_requests_total` (counter): RPC calls by method and outcome
//! - `chain_signatures_total` (counter): signatures produced by kind

/// Record the outcome of a JSON-RPC call.
pub fn record_rpc(method: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("chain_rpc_requests_total", "method" => method, "outcome" => outcome)
        .increment(1);
}

/// Record a produced signature (`message` or `transaction`).
pub fn record_signature(kind: &'static str) {
    metrics::counter!("chain_signatures_total", "kind" => kind).increment(1);
}
