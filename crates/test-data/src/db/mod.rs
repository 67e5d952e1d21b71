//! Database integration for seeding test data.
//!
//! [`connect`] opens the single pool used for a run. Stages write through the
//! [`Store`] trait: [`PgStore`] for Postgres, [`MemoryStore`] for tests.

mod connect;
mod memory;
mod postgres;
mod store;

pub use connect::connect;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;
