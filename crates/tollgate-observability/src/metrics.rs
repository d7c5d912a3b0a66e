use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

static ENABLED: OnceLock<bool> = OnceLock::new();

/// Enabled unless `OBSERVABILITY_ENABLED` is `false` or `0`. Read once per process.
pub fn is_observability_enabled() -> bool {
    *ENABLED.get_or_init(|| match std::env::var("OBSERVABILITY_ENABLED") {
        Ok(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0"),
        Err(_) => true,
    })
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `Ok(None)` when observability is disabled. Must be called from
/// within a Tokio runtime.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )
        .context("invalid histogram buckets")?
        .install_recorder()
        .context("failed to install Prometheus recorder")?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Records count, latency and in-flight requests per matched route.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let labels = RouteLabels::from_request(&req);
    let start = Instant::now();

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    labels.record(response.status().as_u16(), start.elapsed().as_secs_f64());
    response
}

struct RouteLabels {
    method: String,
    path: String,
}

impl RouteLabels {
    fn from_request(req: &Request) -> Self {
        // Route template, or the raw path for unmatched requests.
        let path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_owned())
            .unwrap_or_else(|| req.uri().path().to_owned());

        Self {
            method: req.method().as_str().to_owned(),
            path,
        }
    }

    fn record(self, status: u16, latency_secs: f64) {
        counter!(
            "http_requests_total",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        histogram!("http_request_duration_seconds", "method" => self.method, "path" => self.path)
            .record(latency_secs);
    }
}

// Authentication events. All are no-ops when observability is disabled.

pub fn track_signup(role: &str) {
    if is_observability_enabled() {
        counter!("identities_created_total", "role" => role.to_string()).increment(1);
    }
}

pub fn track_login_success() {
    if is_observability_enabled() {
        counter!("logins_total", "outcome" => "success").increment(1);
    }
}

/// `reason` is `unknown_email` or `wrong_password`; clients never see it.
pub fn track_login_failure(reason: &'static str) {
    if is_observability_enabled() {
        counter!("logins_total", "outcome" => "failure", "reason" => reason).increment(1);
    }
}

pub fn track_token_issued() {
    if is_observability_enabled() {
        counter!("tokens_issued_total").increment(1);
    }
}

pub fn track_token_rejected(reason: &'static str) {
    if is_observability_enabled() {
        counter!("tokens_rejected_total", "reason" => reason).increment(1);
    }
}

/// `decision` is `deny` or `not_found`.
pub fn track_access_denied(decision: &'static str) {
    if is_observability_enabled() {
        counter!("access_denied_total", "decision" => decision).increment(1);
    }
}
