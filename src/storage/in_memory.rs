//! In-memory implementation of MovieStore for testing and development

use crate::core::error::{CatalogError, CatalogResult, StorageError};
use crate::core::movie::{Movie, MovieInput};
use crate::core::service::MovieStore;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;
use validator::Validate;

const BACKEND: &str = "in-memory";

/// In-memory movie store
///
/// Cloning the store shares the same underlying map. Records keep their
/// insertion order.
#[derive(Clone, Default)]
pub struct InMemoryMovieStore {
    movies: Arc<RwLock<IndexMap<Uuid, Movie>>>,
}

impl InMemoryMovieStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(&self) -> CatalogResult<RwLockReadGuard<'_, IndexMap<Uuid, Movie>>> {
        self.movies.read().map_err(|e| poisoned(e.to_string()))
    }

    fn write_guard(&self) -> CatalogResult<RwLockWriteGuard<'_, IndexMap<Uuid, Movie>>> {
        self.movies.write().map_err(|e| poisoned(e.to_string()))
    }
}

fn poisoned(message: String) -> CatalogError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("Failed to acquire lock: {}", message),
    }
    .into()
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn create(&self, input: MovieInput) -> CatalogResult<Movie> {
        input.validate()?;

        let movie = Movie::from_input(Uuid::new_v4(), input);
        self.write_guard()?.insert(movie.id, movie.clone());

        tracing::debug!(id = %movie.id, "created movie");
        Ok(movie)
    }

    async fn get(&self, id: &Uuid) -> CatalogResult<Option<Movie>> {
        Ok(self.read_guard()?.get(id).cloned())
    }

    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        Ok(self.read_guard()?.values().cloned().collect())
    }

    async fn update(&self, id: &Uuid, input: MovieInput) -> CatalogResult<Movie> {
        input.validate()?;

        let mut movies = self.write_guard()?;
        let slot = movies
            .get_mut(id)
            .ok_or_else(|| CatalogError::movie_not_found(*id))?;
        *slot = Movie::from_input(*id, input);

        Ok(slot.clone())
    }

    async fn delete(&self, id: &Uuid) -> CatalogResult<()> {
        // shift_remove keeps the remaining records in insertion order
        self.write_guard()?
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::movie_not_found(*id))
    }

    async fn count(&self) -> CatalogResult<usize> {
        Ok(self.read_guard()?.len())
    }
}
