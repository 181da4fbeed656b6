use crate::{
    http::{dto::request::HasJoinedQuery, state::ClonableState},
    session::SessionError,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn player_has_joined(
    State(state): State<ClonableState>,
    Query(HasJoinedQuery {
        username,
        server_id,
        ip,
    }): Query<HasJoinedQuery>,
) -> Result<Response, SessionError> {
    let profile = state
        .session
        .has_joined(&username, &server_id, ip.as_deref())
        .await?;

    Ok(match profile {
        Some(profile) => (StatusCode::OK, Json(profile)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}
