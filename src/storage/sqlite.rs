//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteMovieStore`, a `MovieStore` backed by a relational
//! `movies` table through `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag (enabled by default).
//!
//! # Schema
//!
//! - `seq` is an autoincrement key used only to keep insertion order
//! - `id` holds the UUID as `TEXT`
//! - `release_date` is ISO `TEXT` (`YYYY-MM-DD`)
//! - `price` is decimal `TEXT` so no precision is lost to `REAL`

use crate::core::error::{CatalogError, CatalogResult, StorageError};
use crate::core::movie::{Movie, MovieInput};
use crate::core::service::MovieStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

const BACKEND: &str = "SQLite";

type MovieRow = (String, String, NaiveDate, String, String);

/// Movie store backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// let store = SqliteMovieStore::connect_lazy("sqlite://movies.db?mode=rwc")?;
/// store.ensure_schema().await?;
/// let movie = store.create(input).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteMovieStore {
    pool: SqlitePool,
}

impl SqliteMovieStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Build a store whose connections are opened on first use
    ///
    /// Only the connection string is checked here, so an unreachable
    /// database surfaces later as `StoreUnavailable` instead of aborting.
    ///
    /// An in-memory database lives only as long as one of its connections,
    /// so for those URLs one connection is kept open and never recycled.
    pub fn connect_lazy(url: &str) -> CatalogResult<Self> {
        let mut options = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5));
        if is_in_memory(url) {
            options = options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = options
            .connect_lazy(url)
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_movie((id, title, release_date, genre, price): MovieRow) -> CatalogResult<Movie> {
        let id = Uuid::parse_str(&id)
            .map_err(|e| integrity(format!("invalid id '{}': {}", id, e)))?;
        let price = Decimal::from_str(&price)
            .map_err(|e| integrity(format!("invalid price '{}': {}", price, e)))?;
        Ok(Movie {
            id,
            title,
            release_date,
            genre,
            price,
        })
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn integrity(message: String) -> CatalogError {
    StorageError::IntegrityError { message }.into()
}

/// Classify a sqlx failure: anything that prevents reaching the database is
/// reported as unavailable, everything else as a query error.
fn storage_error(context: &str, err: sqlx::Error) -> CatalogError {
    let err = match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => StorageError::Unavailable {
            backend: BACKEND.to_string(),
        },
        sqlx::Error::Io(e) => StorageError::ConnectionError {
            backend: BACKEND.to_string(),
            message: e.to_string(),
        },
        sqlx::Error::Configuration(e) => StorageError::ConnectionError {
            backend: BACKEND.to_string(),
            message: e.to_string(),
        },
        sqlx::Error::Database(e) if is_cant_open(e.code().as_deref()) => {
            StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            }
        }
        other => StorageError::QueryError {
            backend: BACKEND.to_string(),
            message: format!("{}: {}", context, other),
        },
    };
    tracing::warn!(error = %err, "{}", context);
    err.into()
}

/// SQLITE_CANTOPEN, including its extended variants
fn is_cant_open(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .is_some_and(|c| c & 0xff == 14)
}

#[async_trait]
impl MovieStore for SqliteMovieStore {
    async fn ensure_schema(&self) -> CatalogResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS movies (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                release_date TEXT NOT NULL,
                genre TEXT NOT NULL,
                price TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to create movies table", e))?;

        Ok(())
    }

    async fn create(&self, input: MovieInput) -> CatalogResult<Movie> {
        input.validate()?;
        let movie = Movie::from_input(Uuid::new_v4(), input);

        sqlx::query(
            "INSERT INTO movies (id, title, release_date, genre, price) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(movie.id.to_string())
        .bind(&movie.title)
        .bind(movie.release_date)
        .bind(&movie.genre)
        .bind(movie.price.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to create movie", e))?;

        tracing::debug!(id = %movie.id, "created movie");
        Ok(movie)
    }

    async fn get(&self, id: &Uuid) -> CatalogResult<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(
            "SELECT id, title, release_date, genre, price FROM movies WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to get movie", e))?;

        row.map(Self::row_to_movie).transpose()
    }

    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            "SELECT id, title, release_date, genre, price FROM movies ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list movies", e))?;

        rows.into_iter().map(Self::row_to_movie).collect()
    }

    async fn update(&self, id: &Uuid, input: MovieInput) -> CatalogResult<Movie> {
        input.validate()?;
        let movie = Movie::from_input(*id, input);

        let result = sqlx::query(
            "UPDATE movies SET title = ?, release_date = ?, genre = ?, price = ? WHERE id = ?",
        )
        .bind(&movie.title)
        .bind(movie.release_date)
        .bind(&movie.genre)
        .bind(movie.price.to_string())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to update movie", e))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::movie_not_found(*id));
        }

        Ok(movie)
    }

    async fn delete(&self, id: &Uuid) -> CatalogResult<()> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete movie", e))?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::movie_not_found(*id));
        }

        Ok(())
    }

    async fn count(&self) -> CatalogResult<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to count movies", e))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
