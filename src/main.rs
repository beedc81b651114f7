use anyhow::Context;
use clap::Parser;
use mvc_movie::config::{AppConfig, CliArgs};
use mvc_movie::server::ServerBuilder;
use mvc_movie::storage::open_store;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "mvc_movie=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = CliArgs::parse();
    let config = AppConfig::from_args(cli)?;

    tracing::info!(
        environment = %config.environment,
        backend = ?config.database.backend,
        seed = config.seed,
        "starting mvc-movie"
    );

    let store = open_store(&config.database).context("failed to open movie store")?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_environment(config.environment)
        .with_seed(config.seed)
        .serve(config.bind)
        .await
}
