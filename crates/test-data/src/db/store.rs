use async_trait::async_trait;

use crate::error::SeedError;
use crate::generators::{GeneratedBooking, GeneratedBusiness, GeneratedService, GeneratedUser};

/// Destination for generated records.
///
/// Every method is a pure insert: records are appended, never updated or
/// deduplicated. A method returns only once the whole slice is stored.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_users(&self, users: &[GeneratedUser]) -> Result<(), SeedError>;

    async fn insert_businesses(&self, businesses: &[GeneratedBusiness]) -> Result<(), SeedError>;

    async fn insert_services(&self, services: &[GeneratedService]) -> Result<(), SeedError>;

    async fn insert_bookings(&self, bookings: &[GeneratedBooking]) -> Result<(), SeedError>;
}
