//! Client side of the business reviews endpoint.
//!
//! - [`ReviewClient`]: issues `GET /api/v1.0.0/business/{id}/reviews` and
//!   normalizes each record so it always carries a reviewer
//! - [`ReviewFeed`]: a watchable `(reviews, error)` pair that refetches whenever
//!   the business id it follows changes

mod client;
mod feed;

pub use client::{DEFAULT_BASE_URL, FetchError, ReviewClient};
pub use feed::{ReviewFeed, ReviewsState};
