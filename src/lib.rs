//! Tax and compliance calculation engine for travel nursing assignments.
//!
//! This crate computes federal, state, and self-employment tax breakdowns,
//! quarterly estimated payments with IRS due dates, stipend and blended-rate
//! comparisons between job offers, and IRS tax-home compliance scores.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
