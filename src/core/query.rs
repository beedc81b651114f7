//! Catalog search and genre filtering
//!
//! A catalog query narrows the movie list by an optional title substring and
//! an optional exact genre, and always reports every genre present in the
//! store so the caller can populate a selection control.
//!
//! # Example
//! ```rust,ignore
//! // In handler:
//! pub async fn index(
//!     State(state): State<AppState>,
//!     Query(query): Query<CatalogQuery>,
//! ) -> CatalogResult<Json<CatalogView>> {
//!     Ok(Json(state.catalog.query(&query).await?))
//! }
//!
//! // Usage:
//! GET /movies?searchString=ghost
//! GET /movies?movieGenre=Comedy
//! GET /movies?searchString=ghost&movieGenre=Comedy
//! ```

use crate::core::error::CatalogResult;
use crate::core::movie::Movie;
use crate::core::service::MovieStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Filter parameters for a catalog query
///
/// Empty strings behave the same as absent parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against the title
    #[serde(rename = "searchString", default)]
    pub search_string: Option<String>,

    /// Exact, case-sensitive genre
    #[serde(rename = "movieGenre", alias = "genre", default)]
    pub genre: Option<String>,
}

impl CatalogQuery {
    pub fn new(search_string: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            search_string: search_string.map(str::to_string),
            genre: genre.map(str::to_string),
        }
    }

    /// The search string, if present and non-empty
    pub fn search(&self) -> Option<&str> {
        self.search_string.as_deref().filter(|s| !s.is_empty())
    }

    /// The genre, if present and non-empty
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }

    /// Whether a movie passes both filters
    pub fn matches(&self, movie: &Movie) -> bool {
        let title_ok = self
            .search()
            .is_none_or(|s| movie.title.to_lowercase().contains(&s.to_lowercase()));
        let genre_ok = self.genre().is_none_or(|g| movie.genre == g);
        title_ok && genre_ok
    }
}

/// Immutable result of a catalog query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    /// Matching movies, in store order
    pub movies: Vec<Movie>,

    /// Distinct genres across the whole store, sorted ascending
    pub genres: Vec<String>,

    /// Echo of the requested genre
    pub selected_genre: Option<String>,

    /// Echo of the requested search string
    pub search_string: Option<String>,
}

impl CatalogView {
    /// Apply `query` to the full record set
    pub fn build(all: Vec<Movie>, query: &CatalogQuery) -> Self {
        let genres: BTreeSet<&str> = all.iter().map(|m| m.genre.as_str()).collect();
        let genres = genres.into_iter().map(str::to_string).collect();

        let movies = all.iter().filter(|m| query.matches(m)).cloned().collect();

        Self {
            movies,
            genres,
            selected_genre: query.genre.clone(),
            search_string: query.search_string.clone(),
        }
    }
}

/// Runs catalog queries against a store
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn MovieStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Read the store and build the filtered view
    pub async fn query(&self, query: &CatalogQuery) -> CatalogResult<CatalogView> {
        let all = self.store.list().await?;
        let view = CatalogView::build(all, query);
        tracing::debug!(
            search = query.search(),
            genre = query.genre(),
            matched = view.movies.len(),
            "catalog query"
        );
        Ok(view)
    }
}
