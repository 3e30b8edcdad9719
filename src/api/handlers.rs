//! HTTP request handlers for the Profit-Sharing Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{calculate, calculate_batch, list_formula_types};
use crate::config::validate_rules;
use crate::error::{EngineError, EngineResult};
use crate::models::{BatchSummary, ProfitSharingInput, ProfitSharingRules};

use super::request::{BatchCalculationRequest, CalculationRequest, ProjectCalculationRequest};
use super::response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, CalculationResponse, ValidationResponse,
};
use super::state::AppState;

/// Version reported in every calculation response.
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate/batch", post(batch_handler))
        .route("/projects/:project_id/calculate", post(project_handler))
        .route("/formula-types", get(formula_types_handler))
        .route("/rules/validate", post(validate_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure onto the API error body.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
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
    ApiErrorResponse::bad_request(error)
}

/// Runs a single calculation and wraps it in the response envelope.
fn respond_with_calculation(correlation_id: Uuid, input: &ProfitSharingInput) -> Response {
    let start_time = Instant::now();
    match calculate(input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                project_id = %result.project_id,
                formula_type = %result.formula_type,
                net_profit = %result.net_profit,
                total_share = %result.total_share,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                CalculationResponse {
                    calculation_id: correlation_id,
                    calculated_at: Utc::now(),
                    engine_version: ENGINE_VERSION.to_string(),
                    result,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a project's figures and rules and returns its profit share.
async fn calculate_handler(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let input = match ProfitSharingInput::try_from(request) {
        Ok(input) => input,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid calculation input");
            return ApiErrorResponse::from(err).into_response();
        }
    };
    respond_with_calculation(correlation_id, &input)
}

/// Handler for POST /calculate/batch endpoint.
///
/// Calculates every input in parallel. Results keep the request order; the
/// whole batch fails if any input fails.
async fn batch_handler(
    payload: Result<Json<BatchCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let inputs = match request
        .inputs
        .into_iter()
        .map(ProfitSharingInput::try_from)
        .collect::<EngineResult<Vec<_>>>()
    {
        Ok(inputs) => inputs,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid batch input");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let start_time = Instant::now();
    // rayon work stays off the async workers
    let outcome = tokio::task::spawn_blocking(move || {
        let results = calculate_batch(&inputs)?;
        let summary = BatchSummary::from_results(&results)?;
        Ok::<_, EngineError>((results, summary))
    })
    .await;

    match outcome {
        Ok(Ok((results, summary))) => {
            info!(
                correlation_id = %correlation_id,
                project_count = summary.project_count,
                total_share = %summary.total_share,
                duration_us = start_time.elapsed().as_micros(),
                "Batch calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                BatchCalculationResponse {
                    calculation_id: correlation_id,
                    calculated_at: Utc::now(),
                    engine_version: ENGINE_VERSION.to_string(),
                    results,
                    summary,
                },
            )
        }
        Ok(Err(err)) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Batch calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Batch calculation task did not complete"
            );
            ApiErrorResponse::internal_error("Batch calculation task did not complete")
                .into_response()
        }
    }
}

/// Handler for POST /projects/:project_id/calculate endpoint.
///
/// Calculates a configured project's share using the rules loaded at
/// startup.
async fn project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    payload: Result<Json<ProjectCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        project_id = %project_id,
        "Processing project calculation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let project = match state.config().get_project(&project_id) {
        Ok(project) => project,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                project_id = %project_id,
                "Project rules not found"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let input = match request.into_input(
        &project.project_id,
        &project.project_name,
        project.rules.clone(),
    ) {
        Ok(input) => input,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid calculation input");
            return ApiErrorResponse::from(err).into_response();
        }
    };
    respond_with_calculation(correlation_id, &input)
}

/// Handler for GET /formula-types endpoint.
async fn formula_types_handler() -> Response {
    json_response(StatusCode::OK, list_formula_types())
}

/// Handler for POST /rules/validate endpoint.
///
/// Reports rule warnings without calculating anything.
async fn validate_handler(
    payload: Result<Json<ProfitSharingRules>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let rules = match payload {
        Ok(Json(rules)) => rules,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let warnings = validate_rules(&rules);
    info!(
        correlation_id = %correlation_id,
        formula_type = %rules.formula_type,
        warnings_count = warnings.len(),
        "Rules validated"
    );

    json_response(
        StatusCode::OK,
        ValidationResponse {
            valid: warnings.is_empty(),
            warnings,
        },
    )
}
