mod get_profiles_by_usernames;
mod servers;

use crate::http::state::ClonableState;
use axum::{
    Router,
    routing::{MethodFilter, on},
};

pub fn router() -> Router<ClonableState> {
    Router::new()
        .route(
            "/profiles/minecraft",
            on(
                MethodFilter::POST,
                get_profiles_by_usernames::get_profiles_by_usernames,
            ),
        )
        .route(
            "/v1/servers/{profile_name}",
            on(MethodFilter::GET, servers::get_servers)
                .on(MethodFilter::POST, servers::create_server),
        )
}
