use crate::{
    http::{
        dto::response::ResponseMessage,
        extractors::{current_profile::CurrentProfile, json_body::JsonBody},
        state::ClonableState,
    },
    servers::{CreateServer, ServersError},
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

pub async fn get_servers(profile: CurrentProfile) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ResponseMessage::new(
            StatusCode::OK,
            String::new(),
            Some(profile.into_servers()),
        )),
    )
}

pub async fn create_server(
    State(state): State<ClonableState>,
    profile: CurrentProfile,
    JsonBody(request): JsonBody<CreateServer>,
) -> Result<impl IntoResponse, ServersError> {
    let server = state.servers.create(profile.name(), request).await?;
    let location = format!(
        "/api/v1/servers/{}/{}",
        path_segment(profile.name()),
        path_segment(&server.name)
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ResponseMessage::<()>::new(
            StatusCode::CREATED,
            "server added",
            None,
        )),
    ))
}

fn path_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
