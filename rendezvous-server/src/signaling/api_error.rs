use crate::error::SignalError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rendezvous_core::{ErrorBody, ErrorKind};
use tracing::{debug, info, warn};

/// A [`SignalError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub SignalError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind())
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::CapacityExceeded => StatusCode::CONFLICT,
        ErrorKind::NotReady => too_early(),
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
    }
}

/// 425, which `http` has no named constant for.
fn too_early() -> StatusCode {
    StatusCode::from_u16(425).unwrap_or(StatusCode::SERVICE_UNAVAILABLE)
}

impl From<SignalError> for ApiError {
    fn from(err: SignalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        match kind {
            ErrorKind::NotReady => debug!("Request not ready: {}", self.0),
            ErrorKind::Unauthorized => warn!("Rejected request: {}", self.0),
            _ => info!("Request failed: {}", self.0),
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            kind,
        };
        (self.status(), Json(body)).into_response()
    }
}
