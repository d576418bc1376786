//! HTTP request handlers for the travel-nurse tax engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_quarterly_estimate, calculate_total_tax, generate_payments, payment_summary,
    rank_offers, score_compliance,
};
use crate::error::EngineError;
use crate::models::ComplianceChecklistItem;

use super::request::{
    ComplianceScoreRequest, OfferComparisonRequest, QuarterlyScheduleRequest, TaxEstimateRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, ComplianceScoreResponse, OfferComparisonResponse,
    QuarterlyScheduleResponse, ScheduledPayment, TaxEstimateResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tax/estimate", post(tax_estimate_handler))
        .route("/offers/compare", post(offers_compare_handler))
        .route("/compliance/score", post(compliance_score_handler))
        .route("/quarterly/schedule", post(quarterly_schedule_handler))
        .with_state(state)
}

/// Converts a JSON extraction rejection into an API error body.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
    }
}

fn bad_request(error: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn engine_error(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
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

fn ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Handler for the POST /tax/estimate endpoint.
///
/// Calculates the annual tax breakdown and the derived four-quarter
/// estimate.
async fn tax_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxEstimateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let config = state.config().config();
    let state_code = request.state.as_deref();

    let breakdown = match calculate_total_tax(
        request.gross_income,
        request.deductions,
        state_code,
        request.self_employed,
        config,
    ) {
        Ok(breakdown) => breakdown,
        Err(err) => return engine_error(err, correlation_id),
    };

    let quarterly = match calculate_quarterly_estimate(
        request.gross_income,
        request.deductions,
        state_code,
        request.self_employed,
        request.tax_year,
        config,
    ) {
        Ok(quarterly) => quarterly,
        Err(err) => return engine_error(err, correlation_id),
    };

    info!(
        correlation_id = %correlation_id,
        tax_year = request.tax_year,
        total_tax = %breakdown.total_tax,
        "Tax estimate completed"
    );

    ok(TaxEstimateResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        breakdown,
        quarterly,
    })
}

/// Handler for the POST /offers/compare endpoint.
///
/// Ranks the submitted offers by weekly take-home pay.
async fn offers_compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<OfferComparisonRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing offer comparison request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let comparison = rank_offers(
        &request.offers,
        request.federal_tax_rate,
        request.state_tax_rate,
        state.config().config(),
    );

    info!(
        correlation_id = %correlation_id,
        offers = request.offers.len(),
        best_offer = ?comparison.best_offer_index,
        "Offer comparison completed"
    );

    ok(OfferComparisonResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        rankings: comparison.rankings,
        best_offer_index: comparison.best_offer_index,
    })
}

/// Handler for the POST /compliance/score endpoint.
///
/// Scores tax-home compliance from the default checklist with the request's
/// status overrides applied.
async fn compliance_score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComplianceScoreRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compliance score request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let compliance_config = state.config().compliance();
    let mut checklist: Vec<ComplianceChecklistItem> = compliance_config.default_checklist();

    for update in &request.checklist {
        match checklist.iter_mut().find(|item| item.id == update.id) {
            Some(item) => item.status = update.status,
            None => {
                return engine_error(
                    EngineError::ChecklistItemNotFound {
                        id: update.id.clone(),
                    },
                    correlation_id,
                );
            }
        }
    }

    let assessment = score_compliance(
        &checklist,
        request.days_at_tax_home,
        request.last_tax_home_visit,
        request.as_of,
        compliance_config,
    );

    info!(
        correlation_id = %correlation_id,
        tax_year = request.tax_year,
        score = assessment.score,
        level = ?assessment.level,
        "Compliance scoring completed"
    );

    ok(ComplianceScoreResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        assessment,
        checklist,
    })
}

/// Handler for the POST /quarterly/schedule endpoint.
///
/// Generates the four-quarter payment plan, preserving paid quarters from
/// the submitted existing payments.
async fn quarterly_schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuarterlyScheduleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quarterly schedule request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(rejection, correlation_id)),
    };

    let payments = match generate_payments(
        request.tax_year,
        request.gross_income,
        request.deductions,
        request.state.as_deref(),
        request.self_employed,
        &request.existing_payments,
        state.config().config(),
    ) {
        Ok(payments) => payments,
        Err(err) => return engine_error(err, correlation_id),
    };

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let summary = payment_summary(&payments, as_of);

    info!(
        correlation_id = %correlation_id,
        tax_year = request.tax_year,
        total_estimated = %summary.total_estimated,
        quarters_paid = summary.quarters_paid,
        "Quarterly schedule generated"
    );

    let payments = payments
        .into_iter()
        .map(|payment| ScheduledPayment {
            status: payment.status(as_of),
            payment,
        })
        .collect();

    ok(QuarterlyScheduleResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: engine_version(),
        payments,
        summary,
    })
}
