pub mod models;
pub mod reviews;

use sqlx::migrate::Migrator;

/// Schema for users, businesses, services and bookings.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
