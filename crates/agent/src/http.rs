//! Exposition server: `GET /metrics` and `GET /health`.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::gauges::GaugeSet;

/// Routes served by the agent.
pub fn router(gauges: GaugeSet) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(gauges)
}

/// Spawn the HTTP server on an already bound listener.
///
/// Returns a `JoinHandle` that resolves when the server shuts down after
/// `shutdown` flips to `true`.
pub fn spawn_metrics_server(
    listener: TcpListener,
    gauges: GaugeSet,
    shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(%addr, "metrics HTTP server listening");
        }

        if let Err(e) = axum::serve(listener, router(gauges))
            .with_graceful_shutdown(async move {
                let mut rx = shutdown;
                while !*rx.borrow() {
                    if rx.changed().await.is_err() {
                        break;
                    }
                }
            })
            .await
        {
            tracing::error!(error = %e, "metrics HTTP server failed");
        }

        tracing::info!("metrics HTTP server stopped");
    })
}

/// Axum handler: `GET /metrics` → Prometheus text format.
async fn metrics_handler(State(gauges): State<GaugeSet>) -> Response {
    match gauges.render() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Axum handler: `GET /health` → liveness plus gauge count.
async fn health_handler(State(gauges): State<GaugeSet>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "metrics": gauges.len() }))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use datimus_rules::{MetricSchedule, MetricTable};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn gauges() -> GaugeSet {
        let mut table = MetricTable::new(0);
        table.insert(MetricSchedule::new("office_hours", vec![]));
        table.insert(MetricSchedule::new("on_call", vec![]));
        GaugeSet::new(&table).unwrap()
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn metrics_renders_current_values() {
        let gauges = gauges();
        gauges.set("office_hours", 1);

        let (status, content_type, body) = get_body(router(gauges), "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some(prometheus::TEXT_FORMAT));
        assert!(body.contains("office_hours 1"));
        assert!(body.contains("on_call 0"));
    }

    #[tokio::test]
    async fn health_reports_metric_count() {
        let (status, _, body) = get_body(router(gauges()), "/health").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["metrics"], 2);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let (status, _, _) = get_body(router(gauges()), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn server_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = watch::channel(false);
        let handle = spawn_metrics_server(listener, gauges(), rx);

        tx.send(true).unwrap();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
    }
}
