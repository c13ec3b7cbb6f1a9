use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures raised while constructing an offering query.
///
/// Creation without a name is the sole hard validation gate in the query
/// engine; every chained filter call after a successful `create` is
/// infallible.
#[derive(Debug, ThisError)]
pub enum OfferingQueryError {
    #[error("Incomplete Offering Query: {message} {location}")]
    Incomplete {
        message: String,
        location: ErrorLocation,
    },
}
