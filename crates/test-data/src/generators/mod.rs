//! Entity generators for test data.
//!
//! This module provides generators for creating realistic test entities:
//! - [`UserGenerator`]: Generate customers and business owners
//! - [`BusinessGenerator`]: One business per business-owner user
//! - [`ServiceGenerator`]: Priced services for each business
//! - [`BookingGenerator`]: Future bookings linking a customer to a business's service
//!
//! Generators only build records. Persisting them is the job of a
//! [`Store`](crate::db::Store), driven by [`pipeline`](crate::pipeline).

pub mod booking;
pub mod business;
pub mod service;
pub mod user;

use rand::Rng;
use uuid::Uuid;

pub use booking::{BookingGenConfig, BookingGenerator, GeneratedBooking};
pub use business::{BUSINESS_CATEGORIES, BusinessGenerator, GeneratedBusiness};
pub use service::{
    BusinessServices, GeneratedService, ServiceGenConfig, ServiceGenerator, group_by_business,
};
pub use user::{GeneratedUser, UserGenConfig, UserGenerator};

/// Draws a v4 UUID from `rng`. A seeded rng yields the same ids on every run.
pub fn random_id(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}
