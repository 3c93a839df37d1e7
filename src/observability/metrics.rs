//! Metrics collection.
//!
//! Counters are emitted through the `metrics` facade; the embedding
//! application chooses an exporter (or none, in which case recording is a
//! no-op).
//!
//! # Metrics
//! - `egress_requests_total` (counter): dispatched requests by verb, outcome
//! - `egress_cache_hits_total` (counter): retry-cache hits by verb
//! - `egress_cache_stores_total` (counter): retry-cache overwrites by verb
//! - `egress_signatures_total` (counter): signature operations by algorithm

/// Count one dispatched request.
///
/// `outcome` is one of `success`, `not_found`, `http_error`,
/// `transport_error`.
pub fn record_fetch(verb: &str, outcome: &'static str) {
    metrics::counter!(
        "egress_requests_total",
        "verb" => verb.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Count a retry-cache hit.
pub fn record_cache_hit(verb: &str) {
    metrics::counter!("egress_cache_hits_total", "verb" => verb.to_string()).increment(1);
}

/// Count a retry-cache slot overwrite.
pub fn record_cache_store(verb: &str) {
    metrics::counter!("egress_cache_stores_total", "verb" => verb.to_string()).increment(1);
}

/// Count a signature-engine operation.
pub fn record_signature(algorithm: &'static str) {
    metrics::counter!("egress_signatures_total", "algorithm" => algorithm).increment(1);
}
