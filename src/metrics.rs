use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Histogram, register_counter, register_counter_vec, register_histogram,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("site_requests_total", "Total number of site requests").unwrap();
    pub static ref FAILURES_TOTAL: CounterVec = register_counter_vec!(
        "site_failures_total",
        "Failed site requests by error kind",
        &["kind"]
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "site_request_latency_seconds",
        "End to end request latency in seconds"
    )
    .unwrap();
    pub static ref FILES_GENERATED: Counter = register_counter!(
        "site_files_generated_total",
        "Total files parsed from model output"
    )
    .unwrap();
    pub static ref DEPLOYMENTS_TOTAL: Counter =
        register_counter!("site_deployments_total", "Total successful deployments").unwrap();
}
