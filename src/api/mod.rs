//! HTTP API module for the subsidy engine.
//!
//! This module provides the REST API endpoints for estimating Child Care
//! Subsidy and inspecting the loaded rate schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::ApiError;
pub use state::AppState;
