//! Server-side HTML rendering with tera
//!
//! Templates are compiled into the binary and registered once at startup.

use crate::config::Environment;
use crate::core::error::{CatalogError, CatalogResult, FieldValidationError};
use crate::core::movie::{Movie, MovieForm};
use crate::core::query::CatalogView;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::collections::BTreeMap;
use tera::{Context, Tera};
use uuid::Uuid;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("details.html", include_str!("../../templates/details.html")),
    ("movie_form.html", include_str!("../../templates/movie_form.html")),
    ("create.html", include_str!("../../templates/create.html")),
    ("edit.html", include_str!("../../templates/edit.html")),
    ("delete.html", include_str!("../../templates/delete.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

/// Compiled HTML templates
pub struct Views {
    tera: Tera,
    environment: Environment,
}

impl Views {
    pub fn new(environment: Environment) -> CatalogResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| CatalogError::Internal(format!("Failed to compile templates: {}", e)))?;
        Ok(Self { tera, environment })
    }

    /// Catalog listing with the search box and genre selector
    pub fn index(&self, view: &CatalogView) -> Response {
        let mut ctx = Context::new();
        ctx.insert("movies", &view.movies);
        ctx.insert("genres", &view.genres);
        ctx.insert(
            "selected_genre",
            view.selected_genre.as_deref().unwrap_or_default(),
        );
        ctx.insert(
            "search_string",
            view.search_string.as_deref().unwrap_or_default(),
        );
        self.render("index.html", &ctx, StatusCode::OK)
    }

    pub fn details(&self, movie: &Movie) -> Response {
        let mut ctx = Context::new();
        ctx.insert("movie", movie);
        self.render("details.html", &ctx, StatusCode::OK)
    }

    /// Create form, optionally annotated with validation errors
    pub fn create_form(&self, form: &MovieForm, errors: &[FieldValidationError]) -> Response {
        let mut ctx = Context::new();
        ctx.insert("form", form);
        ctx.insert("errors", &error_map(errors));
        self.render("create.html", &ctx, form_status(errors))
    }

    /// Edit form, optionally annotated with validation errors
    pub fn edit_form(
        &self,
        id: &Uuid,
        form: &MovieForm,
        errors: &[FieldValidationError],
    ) -> Response {
        let mut ctx = Context::new();
        ctx.insert("id", id);
        ctx.insert("form", form);
        ctx.insert("errors", &error_map(errors));
        self.render("edit.html", &ctx, form_status(errors))
    }

    pub fn delete_confirm(&self, movie: &Movie) -> Response {
        let mut ctx = Context::new();
        ctx.insert("movie", movie);
        self.render("delete.html", &ctx, StatusCode::OK)
    }

    /// Error page for a failed operation
    ///
    /// The error detail is only shown in the development environment.
    pub fn error_page(&self, err: &CatalogError) -> Response {
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }

        let mut ctx = Context::new();
        ctx.insert("status", &status.as_u16());
        ctx.insert("message", public_message(status));
        if self.environment.is_development() {
            ctx.insert("detail", &err.to_string());
        }

        match self.tera.render("error.html", &ctx) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to render error page");
                (status, public_message(status)).into_response()
            }
        }
    }

    fn render(&self, template: &str, ctx: &Context, status: StatusCode) -> Response {
        match self.tera.render(template, ctx) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => self.error_page(&CatalogError::Internal(format!(
                "Failed to render {}: {}",
                template, e
            ))),
        }
    }
}

fn public_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "The requested movie could not be found.",
        StatusCode::BAD_REQUEST => "The request was not understood.",
        StatusCode::SERVICE_UNAVAILABLE => {
            "The movie store is currently unavailable. Please try again later."
        }
        _ => "An error occurred while processing your request.",
    }
}

fn form_status(errors: &[FieldValidationError]) -> StatusCode {
    if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

/// field -> "message; message"
fn error_map(errors: &[FieldValidationError]) -> BTreeMap<&str, String> {
    let mut map: BTreeMap<&str, String> = BTreeMap::new();
    for error in errors {
        map.entry(error.field.as_str())
            .and_modify(|m| {
                m.push_str("; ");
                m.push_str(&error.message);
            })
            .or_insert_with(|| error.message.clone());
    }
    map
}
