pub mod client;
pub mod config;
pub mod http;
pub mod query;

pub use http::HttpError;
pub use query::OfferingQueryError;

use common::ErrorLocation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Query(#[from] query::OfferingQueryError),

    #[error(transparent)]
    Client(#[from] client::ClientError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}
