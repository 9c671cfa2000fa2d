use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{DecisionRequest, LoanOffer};
use super::engine::DecisionEngine;
use super::outcome::{DecisionError, DecisionResponse};
use super::registry::ClientRegistry;

/// Router builder exposing the decision endpoint and the client age lookup.
pub fn decision_router<R>(engine: Arc<DecisionEngine<R>>) -> Router
where
    R: ClientRegistry + 'static,
{
    Router::new()
        .route("/api/v1/loan/decision", post(decision_handler::<R>))
        .route(
            "/api/v1/clients/:personal_code/age",
            get(client_age_handler::<R>),
        )
        .with_state(engine)
}

pub(crate) fn status_for(result: &Result<LoanOffer, DecisionError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(DecisionError::NoValidLoan(_)) => StatusCode::NOT_FOUND,
        Err(DecisionError::Registry(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        Err(_) => StatusCode::BAD_REQUEST,
    }
}

pub(crate) async fn decision_handler<R>(
    State(engine): State<Arc<DecisionEngine<R>>>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    R: ClientRegistry + 'static,
{
    let result = engine.decide(&request);
    let status = status_for(&result);
    (status, axum::Json(DecisionResponse::from(result))).into_response()
}

pub(crate) async fn client_age_handler<R>(
    State(engine): State<Arc<DecisionEngine<R>>>,
    Path(personal_code): Path<String>,
) -> Response
where
    R: ClientRegistry + 'static,
{
    match engine.registry().age_of(&personal_code) {
        Ok(Some(age)) => {
            let payload = json!({
                "personalCode": personal_code,
                "age": age,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "error": "client not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
