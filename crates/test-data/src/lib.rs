//! Test data generation for bookings.
//!
//! This crate seeds a database with synthetic users, businesses, services and
//! bookings for development and integration testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let pool = connect(&DbConfig::new(database_url)).await?;
//! let store = PgStore::new(pool);
//! store.migrate().await?;
//!
//! let report = seed(&store, &SeedConfig::default(), &mut rand::thread_rng()).await?;
//! println!("{} bookings", report.bookings.len());
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod generators;
pub mod pipeline;

pub use bookings::models::{BookingStatus, Role};
pub use error::SeedError;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DbConfig, SeedConfig};
    pub use crate::db::{MemoryStore, PgStore, Store, connect};
    pub use crate::error::SeedError;
    pub use crate::generators::{
        BookingGenerator, BusinessGenerator, ServiceGenerator, UserGenerator,
    };
    pub use crate::pipeline::{SeedReport, Stage, seed};
    pub use crate::{BookingStatus, Role};
}
