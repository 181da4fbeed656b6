use crate::{http::state::ClonableState, session::SessionError};
use axum::{
    Json,
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{MethodFilter, on},
};

pub fn router() -> Router<ClonableState> {
    Router::new().route("/", on(MethodFilter::GET, root))
}

async fn root(State(state): State<ClonableState>) -> Result<impl IntoResponse, SessionError> {
    let metadata = state.session.metadata().await?;

    Ok((StatusCode::OK, Json(metadata)))
}
