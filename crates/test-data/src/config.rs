//! Configuration types for seeding.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How many records of each kind a seeding run produces.
///
/// Zero is accepted everywhere; stages that then find no parents fail with
/// [`SeedError::MissingDependency`](crate::SeedError::MissingDependency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Number of business-owner users, and so of businesses.
    pub business_user_count: usize,

    /// Upper bound of services per business (each gets 1..=max).
    pub max_services_per_business: usize,

    /// Number of customer users.
    pub customer_count: usize,

    /// Total bookings across all businesses.
    pub booking_count: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            business_user_count: 1,
            max_services_per_business: 3,
            customer_count: 2,
            booking_count: 5,
        }
    }
}

/// Default time allowed for the initial database connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub connect_timeout: Duration,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            max_connections: 1,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}
