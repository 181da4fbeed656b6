use crate::{
    http::{dto::request::ProfileNamePath, state::ClonableState},
    servers::GameServer,
};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// The launcher profile named by the `{profile_name}` path segment.
///
/// Rejects with the management api's 400 envelope when the profile does
/// not exist.
pub struct CurrentProfile {
    name: String,
    servers: Vec<GameServer>,
}

impl CurrentProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_servers(self) -> Vec<GameServer> {
        self.servers
    }
}

impl FromRequestParts<ClonableState> for CurrentProfile {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ClonableState,
    ) -> Result<Self, Self::Rejection> {
        let Path(ProfileNamePath { profile_name }) =
            Path::<ProfileNamePath>::from_request_parts(parts, state)
                .await
                .map_err(|err| err.into_response())?;

        let servers = state
            .servers
            .list(&profile_name)
            .await
            .map_err(|err| err.into_response())?;

        Ok(CurrentProfile {
            name: profile_name,
            servers,
        })
    }
}
