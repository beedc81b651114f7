//! API exposure modules for the two surfaces of the catalog
//!
//! Each exposure consumes a shared `ServerHost` and produces an axum `Router`:
//! `html` serves the server-rendered pages, `rest` the JSON API and health
//! checks.

pub mod html;
pub mod rest;

pub use html::HtmlExposure;
pub use rest::RestExposure;

use crate::core::error::{CatalogResult, ValidationError};
use crate::core::query::CatalogQuery;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use uuid::Uuid;

/// Parse a movie id taken from a path segment
pub(crate) fn parse_id(raw: &str) -> CatalogResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        ValidationError::InvalidUuid {
            value: raw.to_string(),
        }
        .into()
    })
}

/// Unwrap catalog filters, turning a malformed query string into a 400
pub(crate) fn catalog_query(
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> CatalogResult<CatalogQuery> {
    query.map(|Query(query)| query).map_err(|e| {
        ValidationError::InvalidQuery {
            message: e.body_text(),
        }
        .into()
    })
}
