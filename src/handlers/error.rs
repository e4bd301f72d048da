// src/handlers/error.rs
use std::fmt;

use warp::http::StatusCode;
use warp::reject::Reject;

use crate::services::simulator::SimulationError;

/// Rejection payload carried through warp; `routes::handle_rejection`
/// turns it into a JSON error body with the stored status.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        ApiError {
            message: message.into(),
            status: StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        match &err {
            SimulationError::InvalidRequest(_) => ApiError::bad_request(err.to_string()),
            // Recoverable "no data in this range" vs "no data for this
            // ticker" get distinct statuses so the frontend can message
            // them differently.
            SimulationError::FilterEmpty => ApiError::unprocessable(err.to_string()),
            SimulationError::MissingSeries(_) => ApiError::not_found(err.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}
