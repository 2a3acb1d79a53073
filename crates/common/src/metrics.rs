use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "item_api_requests_total",
        "Item API operations handled, by binding and operation",
        &["binding", "operation"]
    )
    .expect("register requests_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "item_api_not_found_total",
        "Item lookups that matched no record",
        &["binding"]
    )
    .expect("register not_found_total")
});

pub fn record_request(binding: &str, operation: &str) {
    REQUESTS_TOTAL.with_label_values(&[binding, operation]).inc();
}

pub fn record_not_found(binding: &str) {
    NOT_FOUND_TOTAL.with_label_values(&[binding]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        record_request("unit", "list");
        record_not_found("unit");
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("item_api_requests_total"));
        assert!(body.contains("item_api_not_found_total"));
    }
}
