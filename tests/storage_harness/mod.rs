//! Shared test harness for movie store backends
//!
//! Provides movie fixtures and the `movie_store_tests!` macro that validates
//! any `MovieStore` implementation against the same contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod movie_store_tests;

use async_trait::async_trait;
use chrono::NaiveDate;
use mvc_movie::core::error::{CatalogResult, StorageError};
use mvc_movie::core::movie::{Movie, MovieInput};
use mvc_movie::core::service::MovieStore;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a valid input; `price` is a decimal literal such as `"8.99"`
pub fn movie_input(title: &str, release_date: NaiveDate, genre: &str, price: &str) -> MovieInput {
    MovieInput::new(title, release_date, genre, Decimal::from_str(price).unwrap())
}

pub fn ghostbusters() -> MovieInput {
    movie_input("Ghostbusters", date(1984, 6, 8), "Comedy", "8.99")
}

pub fn dark_knight() -> MovieInput {
    movie_input("The Dark Knight", date(2008, 7, 18), "Action", "9.99")
}

pub fn airplane() -> MovieInput {
    movie_input("Airplane!", date(1980, 7, 2), "Comedy", "7.99")
}

/// The three-movie catalog used by the query scenarios
pub fn scenario_movies() -> Vec<MovieInput> {
    vec![ghostbusters(), dark_knight(), airplane()]
}

pub fn titles(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.title.as_str()).collect()
}

/// A store whose backend can never be reached
#[derive(Default)]
pub struct UnreachableStore {
    pub calls: AtomicUsize,
}

impl UnreachableStore {
    fn fail<T>(&self) -> CatalogResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable {
            backend: "test".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl MovieStore for UnreachableStore {
    async fn create(&self, _input: MovieInput) -> CatalogResult<Movie> {
        self.fail()
    }
    async fn get(&self, _id: &Uuid) -> CatalogResult<Option<Movie>> {
        self.fail()
    }
    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        self.fail()
    }
    async fn update(&self, _id: &Uuid, _input: MovieInput) -> CatalogResult<Movie> {
        self.fail()
    }
    async fn delete(&self, _id: &Uuid) -> CatalogResult<()> {
        self.fail()
    }
}
