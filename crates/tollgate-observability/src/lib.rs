//! Tollgate Observability
//!
//! - Console and rolling JSON file logging via `tracing-subscriber`
//! - Per-request logging middleware
//! - Prometheus metrics for HTTP traffic and authentication events
//!
//! Metrics can be switched off at runtime with `OBSERVABILITY_ENABLED=false`;
//! the counters then become no-ops and `/metrics` is not mounted.
//!
//! ```no_run
//! use tollgate_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     let _handle = init_metrics()?;
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, logging_middleware};
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_middleware, track_access_denied,
    track_login_failure, track_login_success, track_signup, track_token_issued,
    track_token_rejected,
};
pub use metrics_exporter_prometheus::PrometheusHandle;
