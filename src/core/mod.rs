//! Core module containing the movie entity, store trait, and catalog logic

pub mod error;
pub mod movie;
pub mod query;
pub mod seed;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use movie::{Movie, MovieForm, MovieInput};
pub use query::{CatalogQuery, CatalogService, CatalogView};
pub use seed::{SeedData, SeedOutcome, initialize_on_startup};
pub use service::MovieStore;
