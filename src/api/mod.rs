//! HTTP API module for the Profit-Sharing Engine.
//!
//! This module provides the REST API endpoints for calculating project
//! profit shares, either from rules sent with the request or from the
//! rules loaded at startup.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchCalculationRequest, CalculationRequest, ProjectCalculationRequest};
pub use response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, CalculationResponse, ValidationResponse,
};
pub use state::AppState;
