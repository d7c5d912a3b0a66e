use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

const LOG_DIR: &str = "storage/logs";

/// Wraps each request in a span carrying a fresh request id and logs its
/// outcome at a level chosen by status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let span = info_span!(
        "http_request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        path = %path
    );

    async move {
        let start = Instant::now();
        let response = next.run(req).await;
        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        if status.is_server_error() {
            error!(status = status.as_u16(), latency_ms, "Server error");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), latency_ms, "Client error");
        } else {
            info!(status = status.as_u16(), latency_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}

/// Installs the global subscriber: a compact console layer filtered by
/// `RUST_LOG` (or `LOG_LEVEL`), an error-only text file and an info-level JSON
/// file, both rotated daily under `storage/logs`.
pub fn init_tracing() -> anyhow::Result<()> {
    std::fs::create_dir_all(LOG_DIR)
        .with_context(|| format!("failed to create log directory {LOG_DIR}"))?;

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tollgate={log_level},tollgate_auth={log_level},tollgate_db={log_level},\
             tower_http=warn,hyper=info,sqlx=warn"
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "tollgate.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    // Structured logs for ingestion
    let json_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "tollgate.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    info!("Tracing initialized");
    Ok(())
}
