//! # API REST
//!
//! REST API implementation for MaligNet.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `malignet-core` for validation and summaries.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    FieldErrorRes, HealthRes, HealthService, SubmitProteinDataReq, SubmitProteinDataRes,
    ValidationErrorRes,
};
use malignet_core::{
    constants::{GENERIC_FAILURE_MESSAGE, SUBMIT_PROTEIN_DATA_PATH},
    AssessmentError, AssessmentService,
};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    assessment_service: Arc<AssessmentService>,
}

impl AppState {
    pub fn new(assessment_service: AssessmentService) -> Self {
        Self {
            assessment_service: Arc::new(assessment_service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, submit_protein_data),
    components(schemas(
        HealthRes,
        SubmitProteinDataReq,
        SubmitProteinDataRes,
        ValidationErrorRes,
        FieldErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(SUBMIT_PROTEIN_DATA_PATH, post(submit_protein_data))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
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
    path = "/api/submit-protein-data",
    request_body = SubmitProteinDataReq,
    responses(
        (status = 200, description = "Risk summary generated", body = SubmitProteinDataRes),
        (status = 422, description = "Patient data failed validation", body = ValidationErrorRes),
        (status = 500, description = "Summary could not be produced", body = SubmitProteinDataRes)
    )
)]
/// Generate a risk summary for submitted patient data
///
/// Validates every field of the form, including absent or mistyped ones, and, if all are
/// valid, returns the summary produced by the configured provider.
///
/// # Errors
/// Returns `422 Unprocessable Entity` listing each invalid field, or
/// `500 Internal Server Error` with a generic message if the provider fails.
#[axum::debug_handler]
async fn submit_protein_data(
    State(state): State<AppState>,
    Json(req): Json<SubmitProteinDataReq>,
) -> Result<Json<SubmitProteinDataRes>, ApiError> {
    let summary = state.assessment_service.assess_request(&req).await?;
    Ok(Json(SubmitProteinDataRes {
        message: summary.into_string(),
    }))
}

/// Error responses of the REST API.
#[derive(Debug)]
pub struct ApiError(AssessmentError);

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AssessmentError::Validation(errors) => {
                tracing::warn!("Rejected patient data: {}", errors);
                let body = ValidationErrorRes {
                    message: "Invalid patient data".into(),
                    errors: errors
                        .into_iter()
                        .map(|e| FieldErrorRes {
                            field: e.field,
                            message: e.message,
                        })
                        .collect(),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            other => {
                tracing::error!("Submit protein data error: {:?}", other);
                let body = SubmitProteinDataRes {
                    message: GENERIC_FAILURE_MESSAGE.into(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
