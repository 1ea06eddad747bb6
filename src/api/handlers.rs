//! HTTP request handlers for the subsidy engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate;
use crate::models::RawInputs;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/rates", get(rates_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a household description and returns the subsidy estimate.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let raw: RawInputs = request.into();
    let config = state.config();

    let start_time = Instant::now();
    match calculate(&raw, config.rates(), config.regional_fees()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                children = raw.children_count,
                applied_percent = %result.applied_percent,
                annual_out_of_pocket = %result.family_totals.out_of_pocket.annual,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                configuration = err.is_configuration_error(),
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /rates endpoint.
///
/// Returns the loaded rate schedule so callers can see which version and
/// figures an estimate was based on.
async fn rates_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config().rates().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::{ConfigLoader, fixtures};

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::new(
            fixtures::rates_2025_26(),
            fixtures::regional_fees(),
        ))
    }

    fn post_calculate(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "children_count": 1,
            "youngest_age": "one_to_two",
            "income": 95000,
            "income_bucket": "80k_120k",
            "care_type": "centre_based_day_care",
            "state": "NSW",
            "days_per_week": 3,
            "hours_per_day": 10,
            "fee": 140
        })
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let app = create_router(create_test_state());
        let response = app
            .oneshot(post_calculate(valid_body().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let decimal = |value: &serde_json::Value| {
            value.as_str().unwrap().parse::<rust_decimal::Decimal>().unwrap()
        };
        assert_eq!(decimal(&json["applied_percent"]), rust_decimal::Decimal::from(88));
        assert_eq!(
            decimal(&json["primary_session"]["subsidy_per_session"]),
            rust_decimal::Decimal::new(12320, 2)
        );
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let app = create_router(create_test_state());
        let response = app
            .oneshot(post_calculate("{ not json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_invalid_days_returns_400() {
        let app = create_router(create_test_state());
        let mut body = valid_body();
        body["days_per_week"] = serde_json::json!(6);
        let response = app.oneshot(post_calculate(body.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_missing_regional_average_returns_500() {
        let app = create_router(AppState::new(ConfigLoader::new(
            fixtures::rates_2025_26(),
            Default::default(),
        )));
        let mut body = valid_body();
        body["fee"] = serde_json::Value::Null;
        let response = app.oneshot(post_calculate(body.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["code"], "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn test_rates_endpoint() {
        let app = create_router(create_test_state());
        let response = app
            .oneshot(Request::builder().uri("/rates").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["metadata"]["financial_year"], "2025-26");
        assert_eq!(json["ccs"]["max_percent"], "90");
    }
}
