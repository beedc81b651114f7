//! HTTP handlers for the HTML pages
//!
//! Every handler returns a complete `Response`: failures are rendered through
//! the error page instead of the JSON error body.

use crate::core::error::CatalogError;
use crate::core::movie::MovieForm;
use crate::core::query::CatalogQuery;
use crate::server::exposure::{catalog_query, parse_id};
use crate::server::host::ServerHost;
use axum::Form;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

type HostState = State<Arc<ServerHost>>;

const INDEX: &str = "/movies";

/// GET / and GET /movies
pub async fn index(
    State(host): HostState,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Response {
    let view = match catalog_query(query) {
        Ok(query) => host.catalog.query(&query).await,
        Err(e) => Err(e),
    };
    match view {
        Ok(view) => host.views.index(&view),
        Err(e) => host.views.error_page(&e),
    }
}

/// GET /movies/details/{id}
pub async fn details(State(host): HostState, Path(id): Path<String>) -> Response {
    let movie = match parse_id(&id) {
        Ok(id) => host.store.read(&id).await,
        Err(e) => Err(e),
    };
    match movie {
        Ok(movie) => host.views.details(&movie),
        Err(e) => host.views.error_page(&e),
    }
}

/// GET /movies/create
pub async fn create_form(State(host): HostState) -> Response {
    host.views.create_form(&MovieForm::default(), &[])
}

/// POST /movies/create
pub async fn create(State(host): HostState, Form(form): Form<MovieForm>) -> Response {
    let input = match form.parse() {
        Ok(input) => input,
        Err(e) => return redisplay_create(&host, &form, e.into()),
    };

    match host.store.create(input).await {
        Ok(movie) => {
            tracing::info!(id = %movie.id, title = %movie.title, "movie created");
            Redirect::to(INDEX).into_response()
        }
        Err(e) => redisplay_create(&host, &form, e),
    }
}

fn redisplay_create(host: &ServerHost, form: &MovieForm, err: CatalogError) -> Response {
    if err.field_errors().is_empty() {
        host.views.error_page(&err)
    } else {
        host.views.create_form(form, err.field_errors())
    }
}

/// GET /movies/edit/{id}
pub async fn edit_form(State(host): HostState, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return host.views.error_page(&e),
    };
    match host.store.read(&id).await {
        Ok(movie) => host.views.edit_form(&id, &MovieForm::from(&movie), &[]),
        Err(e) => host.views.error_page(&e),
    }
}

/// POST /movies/edit/{id}
pub async fn edit(
    State(host): HostState,
    Path(id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return host.views.error_page(&e),
    };

    let result = match form.parse() {
        Ok(input) => host.store.update(&id, input).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(movie) => {
            tracing::info!(id = %movie.id, "movie updated");
            Redirect::to(INDEX).into_response()
        }
        Err(e) if !e.field_errors().is_empty() => {
            host.views.edit_form(&id, &form, e.field_errors())
        }
        Err(e) => host.views.error_page(&e),
    }
}

/// GET /movies/delete/{id}
pub async fn delete_confirm(State(host): HostState, Path(id): Path<String>) -> Response {
    let movie = match parse_id(&id) {
        Ok(id) => host.store.read(&id).await,
        Err(e) => Err(e),
    };
    match movie {
        Ok(movie) => host.views.delete_confirm(&movie),
        Err(e) => host.views.error_page(&e),
    }
}

/// POST /movies/delete/{id}
pub async fn delete(State(host): HostState, Path(id): Path<String>) -> Response {
    let result = match parse_id(&id) {
        Ok(id) => host.store.delete(&id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            tracing::info!(%id, "movie deleted");
            Redirect::to(INDEX).into_response()
        }
        Err(e) => host.views.error_page(&e),
    }
}
