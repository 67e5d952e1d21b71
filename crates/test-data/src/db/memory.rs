use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::store::Store;
use crate::error::SeedError;
use crate::generators::{GeneratedBooking, GeneratedBusiness, GeneratedService, GeneratedUser};
use crate::pipeline::Stage;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<GeneratedUser>,
    businesses: Vec<GeneratedBusiness>,
    services: Vec<GeneratedService>,
    bookings: Vec<GeneratedBooking>,
}

/// In-process store that keeps every inserted record.
///
/// Can be told to reject writes for one stage, which is how the pipeline's
/// write-failure path is tested without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    reject: Option<Stage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose inserts for `stage` always fail.
    pub fn rejecting(stage: Stage) -> Self {
        Self {
            tables: Mutex::default(),
            reject: Some(stage),
        }
    }

    pub fn users(&self) -> Vec<GeneratedUser> {
        self.tables().users.clone()
    }

    pub fn businesses(&self) -> Vec<GeneratedBusiness> {
        self.tables().businesses.clone()
    }

    pub fn services(&self) -> Vec<GeneratedService> {
        self.tables().services.clone()
    }

    pub fn bookings(&self) -> Vec<GeneratedBooking> {
        self.tables().bookings.clone()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self, stage: Stage) -> Result<(), SeedError> {
        if self.reject == Some(stage) {
            return Err(SeedError::WriteRejected {
                stage,
                reason: "store configured to reject writes".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_users(&self, users: &[GeneratedUser]) -> Result<(), SeedError> {
        self.check(Stage::Users)?;
        self.tables().users.extend_from_slice(users);
        Ok(())
    }

    async fn insert_businesses(&self, businesses: &[GeneratedBusiness]) -> Result<(), SeedError> {
        self.check(Stage::Businesses)?;
        self.tables().businesses.extend_from_slice(businesses);
        Ok(())
    }

    async fn insert_services(&self, services: &[GeneratedService]) -> Result<(), SeedError> {
        self.check(Stage::Services)?;
        self.tables().services.extend_from_slice(services);
        Ok(())
    }

    async fn insert_bookings(&self, bookings: &[GeneratedBooking]) -> Result<(), SeedError> {
        self.check(Stage::Bookings)?;
        self.tables().bookings.extend_from_slice(bookings);
        Ok(())
    }
}
