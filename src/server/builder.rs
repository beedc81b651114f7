//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::router::build_routes;
use crate::config::Environment;
use crate::core::seed::initialize_on_startup;
use crate::core::service::MovieStore;
use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the catalog HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryMovieStore::new())
///     .with_environment(Environment::Development)
///     .serve("127.0.0.1:5000".parse()?)
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn MovieStore>>,
    environment: Environment,
    seed: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            environment: Environment::default(),
            seed: true,
        }
    }

    /// Set the movie store (required)
    pub fn with_store(self, store: impl MovieStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an already shared movie store (required)
    pub fn with_shared_store(mut self, store: Arc<dyn MovieStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Insert the baseline movies into an empty store before serving
    ///
    /// Enabled by default.
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&self) -> Result<ServerHost> {
        let store = self
            .store
            .clone()
            .ok_or_else(|| anyhow::anyhow!("MovieStore is required. Call .with_store()"))?;

        Ok(ServerHost::from_builder_components(store, self.environment)?)
    }

    /// Build the router without touching the store
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(build_routes(host))
    }

    /// Prepare the store, then serve with graceful shutdown
    ///
    /// Seeding (or schema creation when seeding is disabled) finishes before
    /// the listener is bound. Store failures at this point are logged and the
    /// server starts anyway.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let host = Arc::new(self.build_host()?);
        prepare_store(host.store.as_ref(), self.seed).await;

        let app = build_routes(host);
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(environment = %self.environment, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn prepare_store(store: &dyn MovieStore, seed: bool) {
    if seed {
        initialize_on_startup(store).await;
    } else if let Err(e) = store.ensure_schema().await {
        tracing::warn!(error = %e, "failed to prepare movie store schema");
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
