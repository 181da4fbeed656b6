use crate::{
    http::{
        dto::request::{ProfilePath, ProfileQuery},
        state::ClonableState,
    },
    session::SessionError,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn get_profile_by_uuid(
    State(state): State<ClonableState>,
    Path(ProfilePath { uuid }): Path<ProfilePath>,
    Query(ProfileQuery { unsigned }): Query<ProfileQuery>,
) -> Result<Response, SessionError> {
    let Some(profile) = state.session.profile(&uuid, unsigned).await? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    Ok((StatusCode::OK, Json(profile)).into_response())
}
