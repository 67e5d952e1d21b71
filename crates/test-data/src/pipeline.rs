//! Ordered seeding pipeline: users, then businesses, then services, then bookings.
//!
//! Each stage generates its records, waits for the store to accept them, and
//! hands the created records to the next stage as typed input. A stage that
//! fails stops the run; records written by earlier stages stay in the store.

use std::fmt;
use std::time::{Duration, Instant};

use bookings::models::Role;
use rand::Rng;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::config::SeedConfig;
use crate::db::Store;
use crate::error::SeedError;
use crate::generators::{
    BookingGenerator, BusinessGenerator, BusinessServices, GeneratedBooking, GeneratedBusiness,
    GeneratedService, GeneratedUser, ServiceGenerator, UserGenerator, group_by_business,
};

/// One step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Users,
    Businesses,
    Services,
    Bookings,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Users => "users",
            Stage::Businesses => "businesses",
            Stage::Services => "services",
            Stage::Bookings => "bookings",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Users created by the first stage, split by role.
#[derive(Debug, Clone, Default)]
pub struct SeededUsers {
    pub customers: Vec<GeneratedUser>,
    pub owners: Vec<GeneratedUser>,
}

impl SeededUsers {
    pub fn customer_ids(&self) -> Vec<Uuid> {
        self.customers.iter().map(|u| u.id).collect()
    }

    pub fn owner_ids(&self) -> Vec<Uuid> {
        self.owners.iter().map(|u| u.id).collect()
    }

    pub fn len(&self) -> usize {
        self.customers.len() + self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Services created by the third stage, with the per-business grouping bookings need.
#[derive(Debug, Clone, Default)]
pub struct SeededServices {
    pub services: Vec<GeneratedService>,
    pub catalog: Vec<BusinessServices>,
}

/// Everything a successful run created.
#[derive(Debug)]
pub struct SeedReport {
    pub users: SeededUsers,
    pub businesses: Vec<GeneratedBusiness>,
    pub services: SeededServices,
    pub bookings: Vec<GeneratedBooking>,
    pub elapsed: Duration,
}

/// Runs all four stages in order against `store`.
pub async fn seed<S>(
    store: &S,
    config: &SeedConfig,
    rng: &mut impl Rng,
) -> Result<SeedReport, SeedError>
where
    S: Store + ?Sized,
{
    let start = Instant::now();

    let users = seed_users(store, config.customer_count, config.business_user_count, rng).await?;
    let businesses = seed_businesses(store, &users, config.business_user_count, rng).await?;
    let services = seed_services(store, &businesses, config.max_services_per_business, rng).await?;
    let bookings = seed_bookings(
        store,
        &users,
        &services,
        config.booking_count,
        OffsetDateTime::now_utc(),
        rng,
    )
    .await?;

    Ok(SeedReport {
        users,
        businesses,
        services,
        bookings,
        elapsed: start.elapsed(),
    })
}

/// Creates customers and business owners.
pub async fn seed_users<S>(
    store: &S,
    customer_count: usize,
    owner_count: usize,
    rng: &mut impl Rng,
) -> Result<SeededUsers, SeedError>
where
    S: Store + ?Sized,
{
    info!(
        "Seeding {} customers and {} business owners...",
        customer_count, owner_count
    );

    let user_gen = UserGenerator::new();
    let users = SeededUsers {
        customers: user_gen.generate_batch(Role::Customer, customer_count, rng),
        owners: user_gen.generate_batch(Role::BusinessOwner, owner_count, rng),
    };

    store.insert_users(&users.customers).await?;
    store.insert_users(&users.owners).await?;

    info!("Seeded {} users", users.len());
    Ok(users)
}

/// Creates one business for each of the first `count` owners.
pub async fn seed_businesses<S>(
    store: &S,
    users: &SeededUsers,
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<GeneratedBusiness>, SeedError>
where
    S: Store + ?Sized,
{
    info!("Seeding {} businesses...", count);

    let businesses =
        BusinessGenerator::new().generate_for_owners(&users.owner_ids(), count, rng)?;
    store.insert_businesses(&businesses).await?;

    info!("Seeded {} businesses", businesses.len());
    Ok(businesses)
}

/// Creates 1..=`max_per_business` services for every business.
pub async fn seed_services<S>(
    store: &S,
    businesses: &[GeneratedBusiness],
    max_per_business: usize,
    rng: &mut impl Rng,
) -> Result<SeededServices, SeedError>
where
    S: Store + ?Sized,
{
    info!(
        "Seeding up to {} services for each of {} businesses...",
        max_per_business,
        businesses.len()
    );

    let services =
        ServiceGenerator::new().generate_for_businesses(businesses, max_per_business, rng)?;
    store.insert_services(&services).await?;

    info!("Seeded {} services", services.len());
    Ok(SeededServices {
        catalog: group_by_business(businesses, &services),
        services,
    })
}

/// Creates `count` bookings dated after `now`.
pub async fn seed_bookings<S>(
    store: &S,
    users: &SeededUsers,
    services: &SeededServices,
    count: usize,
    now: OffsetDateTime,
    rng: &mut impl Rng,
) -> Result<Vec<GeneratedBooking>, SeedError>
where
    S: Store + ?Sized,
{
    info!("Seeding {} bookings...", count);

    let bookings = BookingGenerator::new().generate_batch(
        &users.customer_ids(),
        &services.catalog,
        count,
        now,
        rng,
    )?;
    store.insert_bookings(&bookings).await?;

    info!("Seeded {} bookings", bookings.len());
    Ok(bookings)
}
