use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "todo_api_requests_total",
        "Todo API requests by operation",
        &["op"]
    )
    .expect("register todo_api_requests_total")
});

pub static ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "todo_api_errors_total",
        "Todo API error responses by kind",
        &["kind"]
    )
    .expect("register todo_api_errors_total")
});

pub fn record_request(op: &str) {
    REQUESTS_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_error(kind: &str) {
    ERRORS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    // touch the counters so they show up before the first request
    Lazy::force(&REQUESTS_TOTAL);
    Lazy::force(&ERRORS_TOTAL);
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
