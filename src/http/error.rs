use crate::{
    http::dto::response::ResponseMessage,
    servers::ServersError,
    session::SessionError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Report;
use tracing::error;

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match &self {
            SessionError::Validation { message } => bad_request(message, Vec::new()),
            SessionError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            _ => {
                error!("session request failed: {}", Report::from_error(&self));
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl IntoResponse for ServersError {
    fn into_response(self) -> Response {
        match self {
            ServersError::Invalid { message, errors } => bad_request(&message, errors),
            err @ ServersError::Store { .. } => {
                error!("servers request failed: {}", Report::from_error(&err));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ResponseMessage::<()>::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        err.to_string(),
                        None,
                    )),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) fn bad_request(message: &str, errors: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ResponseMessage::<()>::new(StatusCode::BAD_REQUEST, message, None).with_errors(errors)),
    )
        .into_response()
}
