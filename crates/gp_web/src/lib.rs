use axum::{
    routing::{get, post},
    Router,
};
use gp_core::Result;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/articles", get(handlers::list_articles))
        .route("/api/articles/:key", get(handlers::get_article))
        .route("/api/featured", get(handlers::get_featured))
        .route("/api/headlines", get(handlers::get_headlines))
        .route("/api/status", get(handlers::get_status))
        .route("/api/reload", post(handlers::reload))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving feed on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use gp_core::{Article, Error, Result};
}
