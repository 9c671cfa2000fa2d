use crate::infra::{AppState, Engine};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use loan_decision::decision::decision_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_decision_routes(engine: Arc<Engine>) -> axum::Router {
    decision_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_engine;
    use loan_decision::config::DecisionConfig;
    use loan_decision::decision::DecisionLimits;
    use tower::ServiceExt;

    fn engine() -> Arc<Engine> {
        build_engine(&DecisionConfig {
            limits: DecisionLimits::default(),
            client_data_path: None,
        })
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = with_decision_routes(engine())
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn decision_route_serves_bundled_clients() {
        let body = json!({
            "personalCode": "49002010987",
            "age": "01.02.1990",
            "loanAmount": 4000,
            "loanPeriod": 12
        });

        let response = with_decision_routes(engine())
            .oneshot(
                axum::http::Request::post("/api/v1/loan/decision")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["approvedAmount"], 3600);
        assert_eq!(payload["approvedPeriod"], 12);
    }
}
