//! REST API exposure
//!
//! JSON endpoints under `/api/movies` plus the liveness routes. Errors are
//! rendered by `CatalogError`'s `IntoResponse` as `{ code, message, details }`.

pub mod handlers;

use super::super::host::ServerHost;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// - `GET    /api/movies` catalog query (`searchString`, `movieGenre`)
    /// - `POST   /api/movies` create
    /// - `GET    /api/movies/{id}` read
    /// - `PUT    /api/movies/{id}` update
    /// - `DELETE /api/movies/{id}` delete
    /// - `GET    /health`, `/healthz`
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        Router::new()
            .route(
                "/api/movies",
                get(handlers::list_movies).post(handlers::create_movie),
            )
            .route(
                "/api/movies/{id}",
                get(handlers::get_movie)
                    .put(handlers::update_movie)
                    .delete(handlers::delete_movie),
            )
            .with_state(host)
            .merge(Self::health_routes())
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "mvc-movie"
        }))
    }
}
