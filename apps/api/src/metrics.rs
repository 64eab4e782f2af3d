//! Prometheus metrics for HTTP traffic.
//!
//! Every request passes through [`track_metrics`]:
//!
//! ```text
//! request ──► http_active_requests +1
//!               │
//!               ▼
//!           handler
//!               │
//!               ▼
//!           http_active_requests -1
//!           http_requests_total +1
//!           http_request_duration_seconds observe(elapsed)
//!           http_request_errors_total +1          (status >= 400 only)
//! ```
//!
//! `route` is the matched template (`/products/{id}`) so ids do not explode
//! label cardinality; unmatched requests fall back to the raw path.
//!
//! Process series (`process_cpu_seconds_total`, `process_resident_memory_bytes`,
//! `process_open_fds`, ...) come from [`ProcessMetrics`], sampled on each scrape.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use metrics_process::Collector;
use thiserror::Error;

pub const REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const ACTIVE_REQUESTS: &str = "http_active_requests";
pub const REQUEST_ERRORS: &str = "http_request_errors_total";

/// Latency buckets in seconds.
pub const DURATION_BUCKETS: &[f64] = &[0.1, 0.3, 0.5, 0.7, 1.0, 3.0, 5.0, 7.0, 10.0];

/// Errors from metrics setup.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Failed to build metrics exporter: {0}")]
    Build(#[from] BuildError),
}

/// Installs the global Prometheus recorder and returns its render handle.
///
/// Fails if a recorder is already installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.to_string()), DURATION_BUCKETS)?
        .install_recorder()?;

    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    describe_histogram!(
        REQUEST_DURATION,
        Unit::Seconds,
        "Duration of HTTP requests in seconds"
    );
    describe_counter!(REQUESTS_TOTAL, "Total number of HTTP requests");
    describe_gauge!(ACTIVE_REQUESTS, "Number of HTTP requests in flight");
    describe_counter!(REQUEST_ERRORS, "Total number of HTTP requests answered with an error");
}

/// Process resource gauges and counters.
///
/// Create after [`install_recorder`] so the descriptions reach the recorder.
#[derive(Clone)]
pub struct ProcessMetrics {
    collector: Arc<Collector>,
}

impl ProcessMetrics {
    pub fn new() -> Self {
        let collector = Collector::default();
        collector.describe();
        ProcessMetrics {
            collector: Arc::new(collector),
        }
    }

    /// Samples the current process into the recorder.
    pub fn refresh(&self) {
        self.collector.collect();
    }
}

impl Default for ProcessMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies an error status for the `error_type` label.
fn error_type(status: StatusCode) -> Option<&'static str> {
    if status.is_server_error() {
        Some("server_error")
    } else if status.is_client_error() {
        Some("client_error")
    } else {
        None
    }
}

/// Middleware recording the HTTP metrics of every request.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    gauge!(ACTIVE_REQUESTS, "method" => method.clone(), "route" => route.clone()).increment(1.0);

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status();
    let status_code = status.as_u16().to_string();

    gauge!(ACTIVE_REQUESTS, "method" => method.clone(), "route" => route.clone()).decrement(1.0);
    counter!(
        REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "status_code" => status_code.clone()
    )
    .increment(1);
    histogram!(
        REQUEST_DURATION,
        "method" => method.clone(),
        "route" => route.clone(),
        "status_code" => status_code
    )
    .record(elapsed);

    if let Some(kind) = error_type(status) {
        counter!(
            REQUEST_ERRORS,
            "method" => method,
            "route" => route,
            "error_type" => kind
        )
        .increment(1);
    }

    response
}
