//! HTTP API module for the travel-nurse tax engine.
//!
//! This module provides the REST API endpoints for tax estimation, job
//! offer comparison, tax-home compliance scoring, and quarterly payment
//! scheduling.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ChecklistOverride, ComplianceScoreRequest, OfferComparisonRequest, QuarterlyScheduleRequest,
    TaxEstimateRequest,
};
pub use response::{
    ApiError, ComplianceScoreResponse, OfferComparisonResponse, QuarterlyScheduleResponse,
    ScheduledPayment, TaxEstimateResponse,
};
pub use state::AppState;
