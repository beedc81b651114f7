//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryMovieStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteMovieStore;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::core::MovieStore;
use crate::core::error::CatalogResult;
use std::sync::Arc;

/// Open the store selected by the configuration
///
/// Relational backends connect lazily, so this only fails on configuration
/// problems, never on an unreachable database.
pub fn open_store(config: &DatabaseConfig) -> CatalogResult<Arc<dyn MovieStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory movie store");
            Ok(Arc::new(InMemoryMovieStore::new()))
        }
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            let url = config.connection_string();
            tracing::info!(url, "using SQLite movie store");
            Ok(Arc::new(SqliteMovieStore::connect_lazy(url)?))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(crate::core::error::ConfigError::InvalidValue {
            field: "database.backend".to_string(),
            value: "sqlite".to_string(),
            message: "this build was compiled without the `sqlite` feature".to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = DatabaseConfig {
            backend: StorageBackend::Memory,
            connection_string: None,
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_open_sqlite_store() {
        let config = DatabaseConfig {
            backend: StorageBackend::Sqlite,
            connection_string: Some("sqlite::memory:".to_string()),
        };
        assert!(open_store(&config).is_ok());
    }
}
