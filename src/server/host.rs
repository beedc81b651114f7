//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds everything a request handler needs: the movie store,
//! the catalog query service, the compiled views and the hosting
//! environment. Both the HTML and JSON exposures consume the same host.

use crate::config::Environment;
use crate::core::error::CatalogResult;
use crate::core::query::CatalogService;
use crate::core::service::MovieStore;
use crate::server::views::Views;
use std::sync::Arc;

/// Host context shared by every exposure
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::from_builder_components(
///     Arc::new(InMemoryMovieStore::new()),
///     Environment::Development,
/// )?);
/// let app = build_routes(host);
/// ```
pub struct ServerHost {
    /// The single shared movie store
    pub store: Arc<dyn MovieStore>,

    /// Catalog search over `store`
    pub catalog: CatalogService,

    /// Compiled HTML templates
    pub views: Views,

    pub environment: Environment,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Fails only if the embedded templates do not compile.
    pub fn from_builder_components(
        store: Arc<dyn MovieStore>,
        environment: Environment,
    ) -> CatalogResult<Self> {
        Ok(Self {
            catalog: CatalogService::new(store.clone()),
            views: Views::new(environment)?,
            store,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::CatalogQuery;
    use crate::storage::InMemoryMovieStore;

    #[tokio::test]
    async fn test_catalog_reads_host_store() {
        let store = InMemoryMovieStore::new();
        let host =
            ServerHost::from_builder_components(Arc::new(store.clone()), Environment::Production)
                .unwrap();

        crate::core::SeedData::initialize(&store).await.unwrap();

        let view = host.catalog.query(&CatalogQuery::default()).await.unwrap();
        assert_eq!(view.movies.len(), 4);
        assert_eq!(host.store.count().await.unwrap(), 4);
    }
}
