use crate::{
    http::{extractors::json_body::JsonBody, state::ClonableState},
    session::{ServerJoinRequest, SessionError},
};
use axum::{
    extract::State,
    http::StatusCode,
};

pub async fn join(
    State(state): State<ClonableState>,
    JsonBody(request): JsonBody<ServerJoinRequest>,
) -> Result<StatusCode, SessionError> {
    state.session.join(request).await?;

    Ok(StatusCode::NO_CONTENT)
}
