//! HTTP handlers for the JSON API

use crate::core::error::{CatalogResult, ValidationError};
use crate::core::movie::{Movie, MovieInput};
use crate::core::query::{CatalogQuery, CatalogView};
use crate::server::exposure::{catalog_query, parse_id};
use crate::server::host::ServerHost;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

type HostState = State<Arc<ServerHost>>;

/// Turn a body rejection into the catalog's JSON error shape
fn body(payload: Result<Json<MovieInput>, JsonRejection>) -> CatalogResult<MovieInput> {
    payload.map(|Json(input)| input).map_err(|e| {
        ValidationError::InvalidBody {
            message: e.body_text(),
        }
        .into()
    })
}

/// GET /api/movies
pub async fn list_movies(
    State(host): HostState,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> CatalogResult<Json<CatalogView>> {
    let query = catalog_query(query)?;
    Ok(Json(host.catalog.query(&query).await?))
}

/// POST /api/movies
pub async fn create_movie(
    State(host): HostState,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> CatalogResult<Response> {
    let movie = host.store.create(body(payload)?).await?;
    tracing::info!(id = %movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)).into_response())
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(host): HostState,
    Path(id): Path<String>,
) -> CatalogResult<Json<Movie>> {
    let id = parse_id(&id)?;
    Ok(Json(host.store.read(&id).await?))
}

/// PUT /api/movies/{id}
pub async fn update_movie(
    State(host): HostState,
    Path(id): Path<String>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> CatalogResult<Json<Movie>> {
    let id = parse_id(&id)?;
    let movie = host.store.update(&id, body(payload)?).await?;
    tracing::info!(id = %movie.id, "movie updated");
    Ok(Json(movie))
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(
    State(host): HostState,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode> {
    let id = parse_id(&id)?;
    host.store.delete(&id).await?;
    tracing::info!(%id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
