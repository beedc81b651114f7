//! Service trait for movie persistence

use crate::core::error::{CatalogError, CatalogResult};
use crate::core::movie::{Movie, MovieInput};
use async_trait::async_trait;
use uuid::Uuid;

/// Durable CRUD over movie records
///
/// Implementations assign ids on `create`, validate input before every
/// write, and return records from `list` in insertion order. The application
/// is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Validate and insert a new movie, returning it with its assigned id
    async fn create(&self, input: MovieInput) -> CatalogResult<Movie>;

    /// Get a movie by ID
    async fn get(&self, id: &Uuid) -> CatalogResult<Option<Movie>>;

    /// List all movies, unfiltered
    async fn list(&self) -> CatalogResult<Vec<Movie>>;

    /// Replace every field except the id
    ///
    /// Fails with `NotFound` when the id is absent.
    async fn update(&self, id: &Uuid, input: MovieInput) -> CatalogResult<Movie>;

    /// Delete a movie
    ///
    /// Fails with `NotFound` when the id is absent.
    async fn delete(&self, id: &Uuid) -> CatalogResult<()>;

    /// Get a movie by ID, treating absence as an error
    async fn read(&self, id: &Uuid) -> CatalogResult<Movie> {
        self.get(id)
            .await?
            .ok_or_else(|| CatalogError::movie_not_found(*id))
    }

    /// Number of stored movies
    async fn count(&self) -> CatalogResult<usize> {
        Ok(self.list().await?.len())
    }

    /// Create tables or other backend structures (idempotent)
    async fn ensure_schema(&self) -> CatalogResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    /// Store holding a single fixed movie
    struct FixedStore(Movie);

    #[async_trait]
    impl MovieStore for FixedStore {
        async fn create(&self, input: MovieInput) -> CatalogResult<Movie> {
            Ok(Movie::from_input(Uuid::new_v4(), input))
        }
        async fn get(&self, id: &Uuid) -> CatalogResult<Option<Movie>> {
            Ok((self.0.id == *id).then(|| self.0.clone()))
        }
        async fn list(&self) -> CatalogResult<Vec<Movie>> {
            Ok(vec![self.0.clone()])
        }
        async fn update(&self, id: &Uuid, input: MovieInput) -> CatalogResult<Movie> {
            Ok(Movie::from_input(*id, input))
        }
        async fn delete(&self, _id: &Uuid) -> CatalogResult<()> {
            Ok(())
        }
    }

    fn fixed() -> FixedStore {
        FixedStore(Movie {
            id: Uuid::new_v4(),
            title: "Rio Bravo".to_string(),
            release_date: NaiveDate::from_ymd_opt(1959, 4, 15).unwrap(),
            genre: "Western".to_string(),
            price: Decimal::new(399, 2),
        })
    }

    #[tokio::test]
    async fn test_read_maps_missing_to_not_found() {
        let store = fixed();
        let err = store.read(&Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");

        let found = store.read(&store.0.id).await.unwrap();
        assert_eq!(found.title, "Rio Bravo");
    }

    #[tokio::test]
    async fn test_default_count_uses_list() {
        assert_eq!(fixed().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_default_ensure_schema_is_noop() {
        assert!(fixed().ensure_schema().await.is_ok());
    }
}
