//! Business generation, one business per business-owner user.

use fake::{
    Fake,
    faker::{
        address::en::{CityName, StreetName},
        company::en::CompanyName,
        phone_number::en::PhoneNumber,
    },
};
use rand::Rng;
use uuid::Uuid;

use super::random_id;
use crate::error::SeedError;
use crate::pipeline::Stage;

/// Kinds of business the generator draws from. Service names are keyed on these.
pub const BUSINESS_CATEGORIES: &[&str] = &[
    "Barbershop",
    "Hair Salon",
    "Nail Studio",
    "Massage",
    "Day Spa",
    "Fitness Studio",
];

/// Generated business data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedBusiness {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    pub address: String,
    pub phone: Option<String>,
}

/// Generates businesses for existing owners.
pub struct BusinessGenerator;

impl BusinessGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a business owned by `owner_id`.
    pub fn generate(&self, owner_id: Uuid, rng: &mut impl Rng) -> GeneratedBusiness {
        let category = BUSINESS_CATEGORIES[rng.gen_range(0..BUSINESS_CATEGORIES.len())];
        let company: String = CompanyName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);

        GeneratedBusiness {
            id: random_id(rng),
            owner_id,
            name: format!("{company} {category}"),
            category: category.to_string(),
            description: format!("{category} in {city}. Book online, walk-ins welcome."),
            address: format!("{} {street}, {city}", rng.gen_range(1..2000)),
            phone: Some(PhoneNumber().fake_with_rng(rng)),
        }
    }

    /// Generates one business for each of the first `count` owners.
    ///
    /// Fails if there are no owners to attach businesses to.
    pub fn generate_for_owners(
        &self,
        owner_ids: &[Uuid],
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedBusiness>, SeedError> {
        if owner_ids.is_empty() {
            return Err(SeedError::MissingDependency {
                stage: Stage::Businesses,
                missing: "business owners",
            });
        }

        Ok(owner_ids
            .iter()
            .take(count)
            .map(|&owner_id| self.generate(owner_id, rng))
            .collect())
    }
}

impl Default for BusinessGenerator {
    fn default() -> Self {
        Self::new()
    }
}
