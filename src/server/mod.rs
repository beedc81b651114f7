//! HTTP server for the movie catalog
//!
//! `ServerBuilder` assembles a `ServerHost` around a movie store and exposes
//! it through the HTML pages and the JSON API.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;
pub mod views;

pub use builder::ServerBuilder;
pub use host::ServerHost;
pub use router::build_routes;
pub use views::Views;
