//! Server-rendered HTML exposure
//!
//! Mirrors the classic list/details/create/edit/delete page set. Successful
//! form posts redirect to the index with `303 See Other`; invalid forms are
//! redisplayed with `422` and the submitted values preserved.

pub mod handlers;

use super::super::host::ServerHost;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// HTML page exposure implementation
pub struct HtmlExposure;

impl HtmlExposure {
    /// Build the page router from a host
    pub fn build_router(host: Arc<ServerHost>) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/movies", get(handlers::index))
            .route("/movies/details/{id}", get(handlers::details))
            .route(
                "/movies/create",
                get(handlers::create_form).post(handlers::create),
            )
            .route(
                "/movies/edit/{id}",
                get(handlers::edit_form).post(handlers::edit),
            )
            .route(
                "/movies/delete/{id}",
                get(handlers::delete_confirm).post(handlers::delete),
            )
            .with_state(host)
    }
}
