pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod query;

#[cfg(test)]
mod tests;

pub use client::{MarketplaceClient, OfferingDescription};
pub use query::{OfferingQuery, QueryElement};

pub const MARKETPLACE_HOSTNAME: &str = "market.offering-exchange.io";
pub const DEFAULT_MARKETPLACE_BASE_URL: &str =
    const_format::concatcp!("https://", MARKETPLACE_HOSTNAME);
