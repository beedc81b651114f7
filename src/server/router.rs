//! The application route table
//!
//! | method | path                    | exposure |
//! |--------|-------------------------|----------|
//! | GET    | `/`, `/movies`          | html     |
//! | GET    | `/movies/details/{id}`  | html     |
//! | GET/POST | `/movies/create`      | html     |
//! | GET/POST | `/movies/edit/{id}`   | html     |
//! | GET/POST | `/movies/delete/{id}` | html     |
//! | GET/POST | `/api/movies`         | rest     |
//! | GET/PUT/DELETE | `/api/movies/{id}` | rest  |
//! | GET    | `/health`, `/healthz`   | rest     |

use super::exposure::{HtmlExposure, RestExposure};
use super::host::ServerHost;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the full router for a host
pub fn build_routes(host: Arc<ServerHost>) -> Router {
    HtmlExposure::build_router(host.clone())
        .merge(RestExposure::build_router(host))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::storage::InMemoryMovieStore;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let host = ServerHost::from_builder_components(
            Arc::new(InMemoryMovieStore::new()),
            Environment::Production,
        )
        .unwrap();
        TestServer::try_new(build_routes(Arc::new(host))).unwrap()
    }

    #[tokio::test]
    async fn test_both_exposures_are_mounted() {
        let server = server();
        server.get("/movies").await.assert_status_ok();
        server.get("/api/movies").await.assert_status_ok();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        server()
            .get("/movies/unknown/route")
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
