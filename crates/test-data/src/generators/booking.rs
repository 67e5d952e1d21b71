//! Booking generation across customers, businesses and their services.

use bookings::models::BookingStatus;
use rand::Rng;
use time::{Duration, OffsetDateTime, Time};
use uuid::Uuid;

use super::random_id;
use super::service::BusinessServices;
use crate::error::SeedError;
use crate::pipeline::Stage;

/// Generated booking data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedBooking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub business_id: Uuid,
    pub service_id: Uuid,
    pub scheduled_at: OffsetDateTime,
    pub status: BookingStatus,
}

/// Configuration for booking generation.
#[derive(Debug, Clone)]
pub struct BookingGenConfig {
    /// Furthest day ahead a booking can be made for.
    pub horizon_days: i64,
    /// First bookable hour of the day (UTC).
    pub opening_hour: i64,
    /// Hour the last slot ends.
    pub closing_hour: i64,
    /// Length of a booking slot in minutes.
    pub slot_minutes: i64,
    /// Status weights [pending, confirmed, cancelled].
    pub status_distribution: [f64; 3],
}

impl Default for BookingGenConfig {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            opening_hour: 9,
            closing_hour: 17,
            slot_minutes: 30,
            status_distribution: [0.4, 0.5, 0.1],
        }
    }
}

/// Generates bookings referencing existing users, businesses and services.
pub struct BookingGenerator {
    config: BookingGenConfig,
}

impl BookingGenerator {
    /// Creates a new booking generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: BookingGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: BookingGenConfig) -> Self {
        Self { config }
    }

    /// Generates `count` bookings in the future relative to `now`.
    ///
    /// Each booking picks a random customer, a random business that offers at
    /// least one service, and one of that business's services. Fails if any of
    /// the three parent sets is empty, even when `count` is zero.
    pub fn generate_batch(
        &self,
        customer_ids: &[Uuid],
        catalog: &[BusinessServices],
        count: usize,
        now: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedBooking>, SeedError> {
        if customer_ids.is_empty() {
            return Err(missing("customers"));
        }
        if catalog.is_empty() {
            return Err(missing("businesses"));
        }

        let bookable: Vec<&BusinessServices> = catalog
            .iter()
            .filter(|b| !b.service_ids.is_empty())
            .collect();
        if bookable.is_empty() {
            return Err(missing("services"));
        }

        let slots_per_day = self.slots_per_day()?;
        let horizon_days = self.config.horizon_days.max(1);
        let today = now.replace_time(Time::MIDNIGHT);

        let mut bookings = Vec::with_capacity(count);
        for _ in 0..count {
            let customer_id = customer_ids[rng.gen_range(0..customer_ids.len())];
            let business = bookable[rng.gen_range(0..bookable.len())];
            let service_id = business.service_ids[rng.gen_range(0..business.service_ids.len())];

            let day = rng.gen_range(1..=horizon_days);
            let slot = rng.gen_range(0..slots_per_day);
            let scheduled_at = today
                + Duration::days(day)
                + Duration::hours(self.config.opening_hour)
                + Duration::minutes(slot * self.config.slot_minutes);

            bookings.push(GeneratedBooking {
                id: random_id(rng),
                customer_id,
                business_id: business.business_id,
                service_id,
                scheduled_at,
                status: self.generate_status(rng),
            });
        }

        Ok(bookings)
    }

    /// Number of slots that fit between opening and closing.
    fn slots_per_day(&self) -> Result<i64, SeedError> {
        let open_minutes = (self.config.closing_hour - self.config.opening_hour) * 60;
        if self.config.slot_minutes <= 0 || open_minutes < self.config.slot_minutes {
            return Err(SeedError::InvalidConfig(format!(
                "no booking slots between {}:00 and {}:00",
                self.config.opening_hour, self.config.closing_hour
            )));
        }
        Ok(open_minutes / self.config.slot_minutes)
    }

    /// Picks a status based on configured distribution.
    fn generate_status(&self, rng: &mut impl Rng) -> BookingStatus {
        let total: f64 = self.config.status_distribution.iter().sum();
        let roll = rng.r#gen::<f64>() * total;
        let mut cumulative = 0.0;

        for (i, &weight) in self.config.status_distribution.iter().enumerate() {
            cumulative += weight;
            if roll < cumulative {
                return match i {
                    0 => BookingStatus::Pending,
                    1 => BookingStatus::Confirmed,
                    _ => BookingStatus::Cancelled,
                };
            }
        }

        BookingStatus::Pending
    }
}

impl Default for BookingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(what: &'static str) -> SeedError {
    SeedError::MissingDependency {
        stage: Stage::Bookings,
        missing: what,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(businesses: usize, services_each: usize) -> Vec<BusinessServices> {
        (0..businesses)
            .map(|_| BusinessServices {
                business_id: Uuid::new_v4(),
                service_ids: (0..services_each).map(|_| Uuid::new_v4()).collect(),
            })
            .collect()
    }

    #[test]
    fn test_service_belongs_to_business() {
        let booking_gen = BookingGenerator::new();
        let mut rng = rand::thread_rng();
        let customers: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let catalog = catalog(4, 3);

        let bookings = booking_gen
            .generate_batch(&customers, &catalog, 50, OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        assert_eq!(bookings.len(), 50);
        for booking in &bookings {
            assert!(customers.contains(&booking.customer_id));
            let business = catalog
                .iter()
                .find(|b| b.business_id == booking.business_id)
                .expect("booking references unknown business");
            assert!(business.service_ids.contains(&booking.service_id));
        }
    }

    #[test]
    fn test_bookings_fall_in_opening_hours_in_the_future() {
        let booking_gen = BookingGenerator::new();
        let mut rng = rand::thread_rng();
        let now = OffsetDateTime::now_utc();
        let customers = vec![Uuid::new_v4()];

        let bookings = booking_gen
            .generate_batch(&customers, &catalog(2, 2), 100, now, &mut rng)
            .unwrap();

        for booking in &bookings {
            assert!(booking.scheduled_at > now);
            assert!(booking.scheduled_at <= now + Duration::days(31));
            let hour = booking.scheduled_at.hour();
            assert!((9..17).contains(&hour), "booking at {hour}:00");
            assert!([0, 30].contains(&booking.scheduled_at.minute()));
            assert!(!matches!(booking.status, BookingStatus::Completed));
        }
    }

    #[test]
    fn test_businesses_without_services_are_skipped() {
        let booking_gen = BookingGenerator::new();
        let mut rng = rand::thread_rng();
        let customers = vec![Uuid::new_v4()];
        let mut catalog = catalog(3, 0);
        catalog[1].service_ids.push(Uuid::new_v4());
        let bookable = catalog[1].business_id;

        let bookings = booking_gen
            .generate_batch(&customers, &catalog, 20, OffsetDateTime::now_utc(), &mut rng)
            .unwrap();

        assert!(bookings.iter().all(|b| b.business_id == bookable));
    }

    #[test]
    fn test_missing_parents_are_dependency_errors() {
        let booking_gen = BookingGenerator::new();
        let mut rng = rand::thread_rng();
        let now = OffsetDateTime::now_utc();
        let customers = vec![Uuid::new_v4()];

        let cases = [
            (Vec::new(), catalog(1, 1), "customers"),
            (customers.clone(), Vec::new(), "businesses"),
            (customers.clone(), catalog(2, 0), "services"),
        ];

        for (customers, catalog, expected) in cases {
            match booking_gen.generate_batch(&customers, &catalog, 0, now, &mut rng) {
                Err(SeedError::MissingDependency {
                    stage: Stage::Bookings,
                    missing,
                }) => assert_eq!(missing, expected),
                other => panic!("expected missing {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_opening_hours() {
        let booking_gen = BookingGenerator::with_config(BookingGenConfig {
            opening_hour: 17,
            closing_hour: 9,
            ..Default::default()
        });
        let mut rng = rand::thread_rng();

        let err = booking_gen
            .generate_batch(
                &[Uuid::new_v4()],
                &catalog(1, 1),
                1,
                OffsetDateTime::now_utc(),
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, SeedError::InvalidConfig(_)));
    }
}
