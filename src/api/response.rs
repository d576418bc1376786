//! Response types for the travel-nurse tax engine API.
//!
//! This module defines the success envelopes, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{ComplianceAssessment, PaymentSummary, RankedOffer};
use crate::error::EngineError;
use crate::models::{
    ComplianceChecklistItem, PaymentStatus, QuarterlyEstimate, QuarterlyPayment,
    TaxableIncomeBreakdown,
};

/// Response body for the `/tax/estimate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxEstimateResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The full tax breakdown.
    pub breakdown: TaxableIncomeBreakdown,
    /// The derived four-quarter estimate.
    pub quarterly: QuarterlyEstimate,
}

/// Response body for the `/offers/compare` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferComparisonResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// Offers ranked best first.
    pub rankings: Vec<RankedOffer>,
    /// Index (into the submitted list) of the best offer.
    pub best_offer_index: Option<usize>,
}

/// Response body for the `/compliance/score` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceScoreResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The scoring result with its points breakdown.
    pub assessment: ComplianceAssessment,
    /// The checklist as scored, with overrides applied.
    pub checklist: Vec<ComplianceChecklistItem>,
}

/// One payment of a schedule with its derived status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPayment {
    /// The payment record.
    pub payment: QuarterlyPayment,
    /// Status as of the request's observation date.
    pub status: PaymentStatus,
}

/// Response body for the `/quarterly/schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarterlyScheduleResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The four payments in quarter order.
    pub payments: Vec<ScheduledPayment>,
    /// Progress summary over the plan.
    pub summary: PaymentSummary,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unsupported-state error response.
    pub fn state_not_supported(state: &str) -> Self {
        Self::with_details(
            "STATE_NOT_SUPPORTED",
            format!("State not supported: {}", state),
            format!(
                "The state code '{}' is neither a no-income-tax state nor has a bracket table",
                state
            ),
        )
    }

    /// Creates an unknown-checklist-item error response.
    pub fn checklist_item_not_found(id: &str) -> Self {
        Self::with_details(
            "CHECKLIST_ITEM_NOT_FOUND",
            format!("Checklist item not found: {}", id),
            format!("'{}' is not one of the default tax-home checklist items", id),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidBracketTable { table, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVALID_BRACKET_TABLE",
                    format!("Invalid bracket table '{}'", table),
                    message,
                ),
            },
            EngineError::StateNotSupported { state } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::state_not_supported(&state),
            },
            EngineError::ChecklistItemNotFound { id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::checklist_item_not_found(&id),
            },
            EngineError::MileageRateNotFound { year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MILEAGE_RATE_NOT_FOUND",
                    format!("No mileage rate configured for {}", year),
                    "The standard mileage table covers 2020 through 2024",
                ),
            },
            EngineError::InvalidTaxYear { year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TAX_YEAR",
                    format!("Invalid tax year: {}", year),
                    "The tax year is outside the supported calendar range",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
