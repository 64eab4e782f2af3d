//! # Tableside API
//!
//! HTTP server for opening tables, placing orders and maintaining the menu.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Middleware Stack                                │
//! │                                                                         │
//! │  SetRequestId ──► TraceLayer ──► PropagateRequestId ──► track_metrics   │
//! │  (x-request-id)   (span/req)     (echo header)          (Prometheus)    │
//! │                                                              │          │
//! │                                                              ▼          │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │ /tables         │ │ /products      │  │ /health  /health/db        ││
//! │  │ /tables-sessions│ │ /orders        │  │ /metrics /presentation     ││
//! │  └───────┬────────┘  └───────┬────────┘  └────────────────────────────┘│
//! │          └─────────┬─────────┘                                          │
//! │                    ▼                                                    │
//! │        tableside-core (lifecycle, ordering, catalog)                    │
//! │                    │ ports                                              │
//! │                    ▼                                                    │
//! │        tableside-db (SQLite repositories)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]. Environment variables:
//! - `TABLESIDE_HOST` - Bind interface (default: 0.0.0.0)
//! - `TABLESIDE_PORT` - HTTP port (default: 3333)
//! - `TABLESIDE_DATABASE_PATH` - SQLite file (default: ./data/tableside.db)
//! - `TABLESIDE_DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `TABLESIDE_LOG_LEVEL` - Tracing filter when `RUST_LOG` is unset (default: info)

pub mod config;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod routes;

use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tableside_db::Database;

use crate::metrics::ProcessMetrics;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub metrics: PrometheusHandle,
    pub process: ProcessMetrics,
}

impl AppState {
    /// Expects the global recorder behind `metrics` to be installed already.
    pub fn new(db: Database, metrics: PrometheusHandle) -> Self {
        AppState {
            db,
            metrics,
            process: ProcessMetrics::new(),
        }
    }
}

/// Builds the application router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    routes::router(state)
}
