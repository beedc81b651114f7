//! # MVC Movie
//!
//! A small movie catalog web application: a movie store with create, read,
//! update and delete, a baseline data seeder, and a catalog page that
//! searches titles and filters by genre.
//!
//! ## Features
//!
//! - **Pluggable storage**: in-memory or SQLite behind the `MovieStore` trait
//! - **Catalog query**: case-insensitive title search plus exact genre filter
//! - **Two surfaces**: server-rendered HTML pages and a JSON API
//! - **Idempotent seeding**: baseline movies inserted into an empty store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mvc_movie::prelude::*;
//!
//! let store = InMemoryMovieStore::new();
//! SeedData::initialize(&store).await?;
//!
//! let catalog = CatalogService::new(Arc::new(store));
//! let view = catalog
//!     .query(&CatalogQuery::new(Some("ghost"), Some("Comedy")))
//!     .await?;
//! assert_eq!(view.genres, vec!["Comedy", "Romantic Comedy", "Western"]);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::{AppConfig, CliArgs, DatabaseConfig, Environment, StorageBackend};

    pub use crate::core::{
        CatalogError, CatalogQuery, CatalogResult, CatalogService, CatalogView, Movie, MovieForm,
        MovieInput, MovieStore, SeedData, SeedOutcome, initialize_on_startup,
    };

    pub use crate::server::{ServerBuilder, ServerHost, build_routes};

    pub use crate::storage::{InMemoryMovieStore, open_store};

    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteMovieStore;

    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
