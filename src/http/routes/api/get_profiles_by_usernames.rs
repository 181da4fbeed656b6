use crate::{
    http::{extractors::json_body::JsonBody, state::ClonableState},
    session::{PlayerUuid, SessionError},
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct GetProfilesByUsernamesRequest(pub Vec<String>);

#[derive(Serialize)]
pub struct GetProfilesByUsernamesResponse(pub Vec<PlayerUuid>);

pub async fn get_profiles_by_usernames(
    State(state): State<ClonableState>,
    JsonBody(GetProfilesByUsernamesRequest(usernames)): JsonBody<GetProfilesByUsernamesRequest>,
) -> Result<impl IntoResponse, SessionError> {
    let players = state.session.players_uuids(&usernames).await?;

    Ok((
        StatusCode::OK,
        Json(GetProfilesByUsernamesResponse(players)),
    ))
}
