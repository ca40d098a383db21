use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cryptowallet_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::InvalidValue(_) | CoreError::InvalidSimulationInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                CoreError::WalletNotFound(_) | CoreError::UserNotFound(_) => StatusCode::NOT_FOUND,
                CoreError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
                CoreError::UnsupportedSymbol(_) | CoreError::AssetRejected(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CoreError::PriceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                CoreError::InvariantViolation(_) | CoreError::Database(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
