//! HTTP listener: landing page at `/`, exposition at the telemetry path.
//!
//! Every request to the telemetry path runs one collection pass. If the
//! client disconnects, axum drops the handler future and the in-flight
//! upstream requests with it.

use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use flaremon_core::{Collector, TierPolicy};

use crate::error::CliError;
use crate::exposition;

#[derive(Clone)]
struct AppState {
    collector: Collector,
    telemetry_path: Arc<str>,
}

/// Build the router for `collector`.
pub fn router(collector: Collector, telemetry_path: &str) -> Router {
    let state = AppState {
        collector,
        telemetry_path: Arc::from(telemetry_path),
    };
    Router::new()
        .route("/", get(landing))
        .route(telemetry_path, get(metrics))
        .with_state(state)
}

/// Serve until `shutdown` is cancelled.
pub async fn run(
    collector: Collector,
    address: SocketAddr,
    telemetry_path: &str,
    shutdown: CancellationToken,
) -> Result<(), CliError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| CliError::Bind {
            address: address.to_string(),
            source,
        })?;

    info!(%address, telemetry_path, "listening");
    axum::serve(listener, router(collector, telemetry_path))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("server stopped");
    Ok(())
}

/// Cancel `token` on Ctrl-C or SIGTERM.
pub async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
        () = token.cancelled() => return,
    }
    token.cancel();
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn metrics(State(state): State<AppState>) -> Response {
    let mut scrape = state.collector.collect().await;
    scrape.records.push(exposition::build_info());
    debug!(
        records = scrape.records.len(),
        failures = scrape.failures.len(),
        "scrape collected"
    );

    match exposition::render(&scrape.records) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, exposition::CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "exposition failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(landing_page(&state.collector, &state.telemetry_path))
}

fn landing_page(collector: &Collector, telemetry_path: &str) -> String {
    let mut rows = String::new();
    for resource in collector.resources() {
        let policy = TierPolicy::resolve(resource.tier);
        let _ = write!(
            rows,
            "<tr><td>{}</td><td><code>{}</code></td><td>{}</td><td>{}s</td></tr>",
            escape(&resource.name),
            escape(&resource.id),
            resource.tier,
            policy.lookback_window.as_secs(),
        );
    }
    let path = escape(telemetry_path);
    format!(
        "<!DOCTYPE html>\n<html><head><title>flaremon</title></head><body>\
         <h1>flaremon {version}</h1>\
         <p><a href=\"{path}\">Metrics</a></p>\
         <table><thead><tr><th>Zone</th><th>ID</th><th>Tier</th><th>Window</th></tr></thead>\
         <tbody>{rows}</tbody></table>\
         </body></html>\n",
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
        assert_eq!(escape("example.com"), "example.com");
    }
}
