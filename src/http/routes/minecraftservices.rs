use crate::http::state::ClonableState;
use axum::{
    Router,
    http::StatusCode,
    routing::{MethodFilter, on},
};

pub fn router() -> Router<ClonableState> {
    Router::new().route(
        "/player/attributes",
        on(MethodFilter::GET, player_attributes),
    )
}

async fn player_attributes() -> StatusCode {
    StatusCode::OK
}
