//! Resolves map short links and share links to `geo:` coordinates without
//! loading the map page in a browser.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod location;
pub mod logging;
pub mod models;
pub mod trace;

pub use error::ResolveError;
pub use location::Resolver;
pub use models::{Coordinate, FetchResult};
pub use trace::TraceLog;
