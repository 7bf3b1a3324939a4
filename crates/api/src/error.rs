use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Internal failure surfaced to the client. Roster outcomes, including
/// infeasibility and rejected parameters, are ordinary `200` responses and
/// never take this path.
#[derive(Debug)]
pub struct ApiError(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError(error.to_string())
    }
}
