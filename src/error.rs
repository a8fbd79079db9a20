use std::convert::Infallible;
use tracing::error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::auth::TokenKind;

/// Caller errors. None of them change registry state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid {0} Token")]
    InvalidToken(TokenKind),
    #[error("Device doesn't exist")]
    UnknownDevice,
    #[error("Missing device name")]
    MalformedRequest,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::UnknownDevice | ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
        }
    }
}

impl warp::reject::Reject for ApiError {}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),
    #[error("no devices configured")]
    NoDevices,
    #[error("device names must not be empty")]
    EmptyDevice,
    #[error("device {0} is configured more than once")]
    DuplicateDevice(String),
    #[error("ttl must be at least one second")]
    ZeroTtl,
    #[error("{0} token check is enabled but the token is empty")]
    MissingToken(TokenKind),
    #[error("invalid listen address {0}")]
    ListenAddr(String),
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status_code(), format!("ERROR: {api_error}"))
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "ERROR: Invalid query string".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(warp::reply::with_status(message, code))
}
