use axum::Router;
use routes::{api, minecraftservices, root, sessionserver};
use tokio::{io, net};

pub mod dto;
mod error;
mod extractors;
mod routes;
pub mod state;

pub fn router(state: state::ClonableState) -> Router {
    Router::new()
        .merge(root::router())
        .nest("/api", api::router())
        .nest("/sessionserver", sessionserver::router())
        .nest("/minecraftservices", minecraftservices::router())
        .with_state(state)
}

pub async fn init(
    listener: net::TcpListener,
    state: state::ClonableState,
) -> Result<(), io::Error> {
    axum::serve(listener, router(state)).await
}
