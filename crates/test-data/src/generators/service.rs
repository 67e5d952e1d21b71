//! Service generation with prices and durations.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Normal};
use uuid::Uuid;

use super::random_id;
use super::business::GeneratedBusiness;
use crate::error::SeedError;
use crate::pipeline::Stage;

/// Generated service data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedService {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub duration_minutes: i32,
}

/// Services offered by one business, as handed to the booking stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessServices {
    pub business_id: Uuid,
    pub service_ids: Vec<Uuid>,
}

/// Configuration for service generation.
#[derive(Debug, Clone)]
pub struct ServiceGenConfig {
    /// Mean price in cents.
    pub price_mean_cents: f64,
    /// Standard deviation of the price in cents.
    pub price_std_cents: f64,
    /// Allowed durations in minutes.
    pub durations: Vec<i32>,
}

impl Default for ServiceGenConfig {
    fn default() -> Self {
        Self {
            price_mean_cents: 4500.0,
            price_std_cents: 2000.0,
            durations: vec![15, 30, 45, 60, 90],
        }
    }
}

const MIN_PRICE_CENTS: f64 = 500.0;
const MAX_PRICE_CENTS: f64 = 25_000.0;

/// Generates services for existing businesses.
pub struct ServiceGenerator {
    config: ServiceGenConfig,
}

impl ServiceGenerator {
    /// Creates a new service generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: ServiceGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: ServiceGenConfig) -> Self {
        Self { config }
    }

    /// Generates between 1 and `max_per_business` services for every business.
    ///
    /// A bound of zero yields no services. Fails if there are no businesses.
    pub fn generate_for_businesses(
        &self,
        businesses: &[GeneratedBusiness],
        max_per_business: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedService>, SeedError> {
        if businesses.is_empty() {
            return Err(SeedError::MissingDependency {
                stage: Stage::Services,
                missing: "businesses",
            });
        }
        if max_per_business == 0 {
            return Ok(Vec::new());
        }
        if self.config.durations.is_empty() {
            return Err(SeedError::InvalidConfig(
                "service durations must not be empty".to_string(),
            ));
        }

        let price = Normal::new(self.config.price_mean_cents, self.config.price_std_cents)
            .map_err(|e| SeedError::InvalidConfig(format!("service price distribution: {e}")))?;

        let mut services = Vec::new();
        for business in businesses {
            let count = rng.gen_range(1..=max_per_business);
            let mut names = service_names(&business.category).to_vec();
            names.shuffle(rng);

            for i in 0..count {
                // Cycle through the templates once a business asks for more than exist.
                let base = names[i % names.len()];
                let name = if i < names.len() {
                    base.to_string()
                } else {
                    format!("{base} ({})", i / names.len() + 1)
                };

                services.push(GeneratedService {
                    id: random_id(rng),
                    business_id: business.id,
                    description: format!("{name} at {}", business.name),
                    name,
                    price_cents: self.sample_price(&price, rng),
                    duration_minutes: self.config.durations
                        [rng.gen_range(0..self.config.durations.len())],
                });
            }
        }

        Ok(services)
    }

    /// Samples a price, rounded to 50 cents.
    fn sample_price(&self, price: &Normal<f64>, rng: &mut impl Rng) -> i64 {
        let cents = price.sample(rng).clamp(MIN_PRICE_CENTS, MAX_PRICE_CENTS);
        ((cents / 50.0).round() * 50.0) as i64
    }
}

impl Default for ServiceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups service ids by business, keeping the business order.
pub fn group_by_business(
    businesses: &[GeneratedBusiness],
    services: &[GeneratedService],
) -> Vec<BusinessServices> {
    businesses
        .iter()
        .map(|business| BusinessServices {
            business_id: business.id,
            service_ids: services
                .iter()
                .filter(|s| s.business_id == business.id)
                .map(|s| s.id)
                .collect(),
        })
        .collect()
}

fn service_names(category: &str) -> &'static [&'static str] {
    match category {
        "Barbershop" => &["Haircut", "Beard Trim", "Hot Towel Shave", "Buzz Cut", "Kids Cut"],
        "Hair Salon" => &["Cut & Blow Dry", "Colour", "Highlights", "Blowout", "Treatment"],
        "Nail Studio" => &["Manicure", "Pedicure", "Gel Polish", "Nail Art", "Acrylic Set"],
        "Massage" => &["Swedish Massage", "Deep Tissue", "Hot Stone", "Sports Massage"],
        "Day Spa" => &["Facial", "Body Scrub", "Aromatherapy", "Mud Wrap"],
        "Fitness Studio" => &["Personal Training", "Yoga Class", "Pilates", "Spin Class"],
        _ => &["Consultation", "Standard Appointment", "Extended Appointment"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::BusinessGenerator;

    fn businesses(count: usize) -> Vec<GeneratedBusiness> {
        let mut rng = rand::thread_rng();
        let owners: Vec<Uuid> = (0..count).map(|_| Uuid::new_v4()).collect();
        BusinessGenerator::new()
            .generate_for_owners(&owners, count, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_services_per_business_in_range() {
        let service_gen = ServiceGenerator::new();
        let mut rng = rand::thread_rng();
        let businesses = businesses(20);

        let services = service_gen
            .generate_for_businesses(&businesses, 3, &mut rng)
            .unwrap();

        for group in group_by_business(&businesses, &services) {
            assert!(
                (1..=3).contains(&group.service_ids.len()),
                "Expected 1..=3 services, got {}",
                group.service_ids.len()
            );
        }
    }

    #[test]
    fn test_prices_and_durations() {
        let service_gen = ServiceGenerator::new();
        let mut rng = rand::thread_rng();
        let businesses = businesses(10);

        let services = service_gen
            .generate_for_businesses(&businesses, 5, &mut rng)
            .unwrap();

        for service in &services {
            assert!(service.price_cents >= MIN_PRICE_CENTS as i64);
            assert!(service.price_cents <= MAX_PRICE_CENTS as i64);
            assert_eq!(service.price_cents % 50, 0);
            assert!([15, 30, 45, 60, 90].contains(&service.duration_minutes));
        }
    }

    #[test]
    fn test_more_services_than_templates_get_unique_names() {
        let service_gen = ServiceGenerator::new();
        let mut rng = rand::thread_rng();
        let businesses = businesses(1);

        let services = service_gen
            .generate_for_businesses(&businesses, 12, &mut rng)
            .unwrap();

        let names: std::collections::HashSet<_> = services.iter().map(|s| &s.name).collect();
        assert_eq!(names.len(), services.len());
    }

    #[test]
    fn test_zero_bound_yields_nothing() {
        let service_gen = ServiceGenerator::new();
        let mut rng = rand::thread_rng();

        let services = service_gen
            .generate_for_businesses(&businesses(2), 0, &mut rng)
            .unwrap();
        assert!(services.is_empty());
    }

    #[test]
    fn test_no_businesses_is_dependency_error() {
        let service_gen = ServiceGenerator::new();
        let mut rng = rand::thread_rng();

        let err = service_gen
            .generate_for_businesses(&[], 3, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            SeedError::MissingDependency {
                stage: Stage::Services,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_price_distribution() {
        let service_gen = ServiceGenerator::with_config(ServiceGenConfig {
            price_std_cents: -1.0,
            ..Default::default()
        });
        let mut rng = rand::thread_rng();

        let err = service_gen
            .generate_for_businesses(&businesses(1), 3, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SeedError::InvalidConfig(_)));
    }
}
