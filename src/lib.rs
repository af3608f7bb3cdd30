pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod region;
pub mod service;
pub mod table;

pub use auth::ApiKey;
pub use client::{CatalogUrls, Hosts, RiotClient};
pub use error::{FlattenError, LookupError, RiotError};
pub use extract::extract;
pub use flatten::flatten;
pub use lookup::LookupTable;
pub use models::match_row::{MatchRow, Rune, Side};
pub use region::{Platform, Region};
pub use table::MatchTable;
