use async_trait::async_trait;
use sqlx::PgPool;

use super::store::Store;
use crate::error::SeedError;
use crate::generators::{GeneratedBooking, GeneratedBusiness, GeneratedService, GeneratedUser};
use crate::pipeline::Stage;

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    batch_size: usize,
}

impl PgStore {
    /// Creates a new store with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            batch_size: 50,
        }
    }

    /// Sets how many rows are written per transaction.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Creates the booking tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), SeedError> {
        bookings::MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool, waiting for connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl PgStore {
    async fn write_users(&self, users: &[GeneratedUser]) -> Result<(), sqlx::Error> {
        for chunk in users.chunks(self.batch_size) {
            let mut tx = self.pool.begin().await?;
            for user in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO users (id, role, username, name, email, phone, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, NOW())
                    "#,
                )
                .bind(user.id)
                .bind(user.role.as_str())
                .bind(&user.username)
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.phone)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
        }

        Ok(())
    }

    async fn write_businesses(&self, businesses: &[GeneratedBusiness]) -> Result<(), sqlx::Error> {
        for chunk in businesses.chunks(self.batch_size) {
            let mut tx = self.pool.begin().await?;
            for business in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO businesses (id, owner_id, name, category, description, address, phone, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
                    "#,
                )
                .bind(business.id)
                .bind(business.owner_id)
                .bind(&business.name)
                .bind(&business.category)
                .bind(&business.description)
                .bind(&business.address)
                .bind(&business.phone)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
        }

        Ok(())
    }

    async fn write_services(&self, services: &[GeneratedService]) -> Result<(), sqlx::Error> {
        for chunk in services.chunks(self.batch_size) {
            let mut tx = self.pool.begin().await?;
            for service in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO services (id, business_id, name, description, price_cents, duration_minutes, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, NOW())
                    "#,
                )
                .bind(service.id)
                .bind(service.business_id)
                .bind(&service.name)
                .bind(&service.description)
                .bind(service.price_cents)
                .bind(service.duration_minutes)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
        }

        Ok(())
    }

    async fn write_bookings(&self, bookings: &[GeneratedBooking]) -> Result<(), sqlx::Error> {
        for chunk in bookings.chunks(self.batch_size) {
            let mut tx = self.pool.begin().await?;
            for booking in chunk {
                sqlx::query(
                    r#"
                    INSERT INTO bookings (id, customer_id, business_id, service_id, scheduled_at, status, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, NOW())
                    "#,
                )
                .bind(booking.id)
                .bind(booking.customer_id)
                .bind(booking.business_id)
                .bind(booking.service_id)
                .bind(booking.scheduled_at)
                .bind(booking.status.as_str())
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_users(&self, users: &[GeneratedUser]) -> Result<(), SeedError> {
        self.write_users(users)
            .await
            .map_err(|e| SeedError::insert(Stage::Users, e))
    }

    async fn insert_businesses(&self, businesses: &[GeneratedBusiness]) -> Result<(), SeedError> {
        self.write_businesses(businesses)
            .await
            .map_err(|e| SeedError::insert(Stage::Businesses, e))
    }

    async fn insert_services(&self, services: &[GeneratedService]) -> Result<(), SeedError> {
        self.write_services(services)
            .await
            .map_err(|e| SeedError::insert(Stage::Services, e))
    }

    async fn insert_bookings(&self, bookings: &[GeneratedBooking]) -> Result<(), SeedError> {
        self.write_bookings(bookings)
            .await
            .map_err(|e| SeedError::insert(Stage::Bookings, e))
    }
}
