use axum::http::StatusCode;
use serde::Serialize;

/// Envelope of the management api responses.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage<T> {
    pub status: String,
    pub status_code: u16,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub errors: Vec<String>,
}

impl<T> ResponseMessage<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        ResponseMessage {
            status: status.canonical_reason().unwrap_or_default().to_string(),
            status_code: status.as_u16(),
            message: message.into(),
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}
