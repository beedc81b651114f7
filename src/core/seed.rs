//! Baseline catalog data inserted on first start

use crate::core::error::CatalogResult;
use crate::core::movie::MovieInput;
use crate::core::service::MovieStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Result of a seeding attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and the baseline movies were inserted
    Seeded { inserted: usize },
    /// The store already held movies and was left untouched
    AlreadyPopulated { existing: usize },
}

/// Seed initializer for the movie store
pub struct SeedData;

impl SeedData {
    /// The fixed baseline movies
    pub fn movies() -> Vec<MovieInput> {
        [
            ("When Harry Met Sally", (1989, 2, 12), "Romantic Comedy", 799),
            ("Ghostbusters", (1984, 3, 13), "Comedy", 899),
            ("Ghostbusters 2", (1986, 2, 23), "Comedy", 999),
            ("Rio Bravo", (1959, 4, 15), "Western", 399),
        ]
        .into_iter()
        .filter_map(|(title, (y, m, d), genre, cents)| {
            NaiveDate::from_ymd_opt(y, m, d)
                .map(|date| MovieInput::new(title, date, genre, Decimal::new(cents, 2)))
        })
        .collect()
    }

    /// Insert the baseline movies unless the store already has data
    pub async fn initialize(store: &dyn MovieStore) -> CatalogResult<SeedOutcome> {
        let existing = store.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "movie store already populated, skipping seed");
            return Ok(SeedOutcome::AlreadyPopulated { existing });
        }

        let movies = Self::movies();
        let inserted = movies.len();
        for movie in movies {
            store.create(movie).await?;
        }

        tracing::info!(inserted, "seeded movie store");
        Ok(SeedOutcome::Seeded { inserted })
    }
}

/// Prepare the schema and seed the store before serving
///
/// Failures are logged and swallowed: the server still starts and live
/// requests report the store as unavailable.
pub async fn initialize_on_startup(store: &dyn MovieStore) -> Option<SeedOutcome> {
    let result = async {
        store.ensure_schema().await?;
        SeedData::initialize(store).await
    }
    .await;

    match result {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            tracing::error!(error = %e, "An error occurred seeding the DB.");
            None
        }
    }
}
