//! # API REST
//!
//! REST API for submitting patient orders.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Validation and acknowledgement live in `orders-core`; this crate only maps them onto HTTP.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod health;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use orders_core::constants::BODY_FIELD;
use orders_core::{acknowledge, FieldPath, FieldViolation, Order, Patient, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub use config::{ConfigError, RestConfig};
pub use health::{HealthRes, HealthService};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<RestConfig>,
}

impl AppState {
    pub fn new(cfg: RestConfig) -> Self {
        Self { cfg: Arc::new(cfg) }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(greeting, health, create_order),
    components(schemas(
        HealthRes,
        Order,
        Patient,
        ValidationErrorRes,
        ViolationRes,
    ))
)]
pub struct ApiDoc;

/// Body returned with `400 Bad Request` when an order fails validation.
///
/// `message` carries one line per failed constraint; `violations` carries the same failures in
/// structured form.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorRes {
    pub status_code: u16,
    pub error: String,
    pub message: Vec<String>,
    pub violations: Vec<ViolationRes>,
}

/// Wire form of a single failed constraint.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ViolationRes {
    pub field: String,
    pub constraint: String,
    pub message: String,
}

/// A `ValidationError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiValidationError(pub ValidationError);

impl From<ValidationError> for ApiValidationError {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiValidationError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let message = self.0.messages();
        let violations = self
            .0
            .into_violations()
            .into_iter()
            .map(|v| ViolationRes {
                field: v.field,
                constraint: v.constraint.as_str().to_string(),
                message: v.message,
            })
            .collect();

        let body = ValidationErrorRes {
            status_code: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Bad Request")
                .to_string(),
            message,
            violations,
        };
        (status, Json(body)).into_response()
    }
}

/// Build the REST router.
///
/// # Routes
/// - `GET /` - greeting
/// - `GET /health` - health check
/// - `POST /orders` - validate an order and return its acknowledgement
/// - `/swagger-ui` and `/api-docs/openapi.json` - API documentation
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health))
        .route("/orders", post(create_order))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain")
    )
)]
#[axum::debug_handler]
async fn greeting(State(state): State<AppState>) -> String {
    state.cfg.greeting().to_string()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = Order,
    responses(
        (status = 200, description = "Order acknowledged", body = String, content_type = "text/plain"),
        (status = 400, description = "Order failed validation", body = ValidationErrorRes)
    )
)]
/// Validate an order and acknowledge it
///
/// The body is taken as raw JSON so that every failure, including a body that is not JSON at
/// all, is reported with the same `400` shape.
///
/// # Returns
/// * `Ok(String)` - `New patient: <first> <last>` or `Existing patient: <id>`
/// * `Err(ApiValidationError)` - `400 Bad Request` listing every failed constraint
#[axum::debug_handler]
async fn create_order(
    State(_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<String, ApiValidationError> {
    let Json(value) = payload.map_err(|rejection| {
        tracing::warn!("Rejected order body: {}", rejection.body_text());
        ValidationError::from(FieldViolation::is_object(&FieldPath::root().child(BODY_FIELD)))
    })?;

    let order = Order::from_value(&value).map_err(|err| {
        tracing::warn!(violations = ?err.messages(), "Rejected order");
        err
    })?;

    tracing::info!(kind = order.patient.kind(), "Accepted order");
    Ok(acknowledge(&order))
}
