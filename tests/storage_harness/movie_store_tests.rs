//! Macro-generated test suite for `MovieStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use mvc_movie::storage::InMemoryMovieStore;
//!
//! movie_store_tests!(InMemoryMovieStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_then_read_round_trips`: every field except id survives
//! - `test_create_assigns_unique_ids`
//! - `test_get_nonexistent`: `get` returns None, `read` returns NotFound
//! - `test_list_empty`
//! - `test_list_keeps_insertion_order`
//! - `test_update_existing`: all fields replaced, id kept
//! - `test_update_nonexistent`: NotFound
//! - `test_delete_existing`: record gone afterwards
//! - `test_delete_nonexistent`: NotFound
//!
//! ## Validation
//! - `test_create_rejects_blank_title`
//! - `test_create_rejects_negative_price`
//! - `test_update_rejects_invalid_input`
//!
//! ## Edge Cases
//! - `test_count_tracks_writes`
//! - `test_concurrent_access`: parallel creates from spawned tasks

/// Generate a full `MovieStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to a fresh, empty store.
/// It is re-evaluated for each test to ensure isolation and may contain
/// `.await`. For the concurrent access test, the returned store must also
/// implement `Clone + 'static` (shared state via Arc pattern).
#[macro_export]
macro_rules! movie_store_tests {
    ($factory:expr) => {
        mod movie_store_contract_tests {
            use super::*;
            use mvc_movie::core::error::{CatalogError, EntityError, ValidationError};
            use mvc_movie::core::service::MovieStore;
            use rust_decimal::Decimal;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_then_read_round_trips() {
                let store = $factory;
                let input = ghostbusters();

                let created = store.create(input.clone()).await.unwrap();
                assert_eq!(created.to_input(), input);

                let read = store.read(&created.id).await.unwrap();
                assert_eq!(read, created);
                assert_eq!(read.price.to_string(), "8.99");
                assert_eq!(read.release_date, date(1984, 6, 8));
            }

            #[tokio::test]
            async fn test_create_assigns_unique_ids() {
                let store = $factory;
                let a = store.create(ghostbusters()).await.unwrap();
                let b = store.create(ghostbusters()).await.unwrap();
                assert_ne!(a.id, b.id);
                assert_eq!(store.count().await.unwrap(), 2);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                let id = Uuid::new_v4();

                assert!(store.get(&id).await.unwrap().is_none());

                let err = store.read(&id).await.unwrap_err();
                assert!(
                    matches!(err, CatalogError::Entity(EntityError::NotFound { id: missing, .. }) if missing == id),
                    "expected NotFound, got {:?}",
                    err
                );
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
                assert_eq!(store.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_list_keeps_insertion_order() {
                let store = $factory;
                for input in scenario_movies() {
                    store.create(input).await.unwrap();
                }

                let all = store.list().await.unwrap();
                assert_eq!(
                    titles(&all),
                    vec!["Ghostbusters", "The Dark Knight", "Airplane!"]
                );
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let created = store.create(ghostbusters()).await.unwrap();

                let replacement = movie_input("Ghostbusters II", date(1989, 6, 16), "Fantasy", "9.49");
                let updated = store.update(&created.id, replacement.clone()).await.unwrap();
                assert_eq!(updated.id, created.id);
                assert_eq!(updated.to_input(), replacement);

                let read = store.read(&created.id).await.unwrap();
                assert_eq!(read, updated);
                assert_eq!(store.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let err = store.update(&Uuid::new_v4(), ghostbusters()).await.unwrap_err();
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let keep = store.create(dark_knight()).await.unwrap();
                let gone = store.create(ghostbusters()).await.unwrap();

                store.delete(&gone.id).await.unwrap();

                assert!(store.get(&gone.id).await.unwrap().is_none());
                assert_eq!(store.list().await.unwrap(), vec![keep]);
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                store.create(airplane()).await.unwrap();

                let err = store.delete(&Uuid::new_v4()).await.unwrap_err();
                assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
                assert_eq!(store.count().await.unwrap(), 1);
            }

            // ==================================================================
            // Validation
            // ==================================================================

            #[tokio::test]
            async fn test_create_rejects_blank_title() {
                let store = $factory;
                let mut input = ghostbusters();
                input.title = "  ".to_string();

                let err = store.create(input).await.unwrap_err();
                assert!(matches!(err, CatalogError::Validation(ValidationError::FieldErrors(_))));
                assert_eq!(err.field_errors()[0].field, "title");
                assert_eq!(store.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_create_rejects_negative_price() {
                let store = $factory;
                let mut input = airplane();
                input.price = Decimal::new(-1, 2);

                let err = store.create(input).await.unwrap_err();
                assert_eq!(err.status_code().as_u16(), 422);
                assert_eq!(err.field_errors()[0].field, "price");
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_rejects_invalid_input() {
                let store = $factory;
                let created = store.create(dark_knight()).await.unwrap();

                let mut bad = dark_knight();
                bad.genre = String::new();
                assert!(store.update(&created.id, bad).await.is_err());

                assert_eq!(store.read(&created.id).await.unwrap(), created);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_count_tracks_writes() {
                let store = $factory;
                let a = store.create(ghostbusters()).await.unwrap();
                store.create(airplane()).await.unwrap();
                assert_eq!(store.count().await.unwrap(), 2);

                store.delete(&a.id).await.unwrap();
                assert_eq!(store.count().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let store = $factory;
                let s1 = store.clone();
                let s2 = store.clone();

                let h1 = tokio::spawn(async move { s1.create(ghostbusters()).await });
                let h2 = tokio::spawn(async move { s2.create(airplane()).await });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent creates timed out after 30s, possible deadlock");

                let id1 = r1.unwrap().id;
                let id2 = r2.unwrap().id;

                let all = store.list().await.unwrap();
                assert_eq!(all.len(), 2, "Both concurrently created movies should be present");

                let ids: Vec<Uuid> = all.iter().map(|m| m.id).collect();
                assert!(ids.contains(&id1), "Movie A should be present");
                assert!(ids.contains(&id2), "Movie B should be present");
            }
        }
    };
}
