//! User generation for customers and business owners.

use bookings::models::Role;
use fake::{
    Fake,
    faker::{internet::en::Username, name::en::Name, phone_number::en::PhoneNumber},
};
use rand::Rng;
use uuid::Uuid;

use super::random_id;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub id: Uuid,
    pub role: Role,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    /// Probability that a phone number is filled in.
    pub phone_fill_rate: f64,
    /// Mail domains used for generated addresses.
    pub email_domains: Vec<String>,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            phone_fill_rate: 0.8,
            email_domains: vec![
                "gmail.com".to_string(),
                "outlook.com".to_string(),
                "yahoo.com".to_string(),
                "proton.me".to_string(),
            ],
        }
    }
}

/// Generates realistic user data for testing.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single user with the given role.
    pub fn generate(&self, role: Role, rng: &mut impl Rng) -> GeneratedUser {
        let name: String = Name().fake_with_rng(rng);
        let username: String = Username().fake_with_rng(rng);
        let email = self.generate_email(&name, rng);

        let phone = if rng.r#gen::<f64>() < self.config.phone_fill_rate {
            Some(PhoneNumber().fake_with_rng(rng))
        } else {
            None
        };

        GeneratedUser {
            id: random_id(rng),
            role,
            username,
            name,
            email,
            phone,
        }
    }

    /// Generates `count` users sharing one role.
    pub fn generate_batch(&self, role: Role, count: usize, rng: &mut impl Rng) -> Vec<GeneratedUser> {
        (0..count).map(|_| self.generate(role, rng)).collect()
    }

    /// Generates an email from a name.
    fn generate_email(&self, name: &str, rng: &mut impl Rng) -> String {
        let normalized: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == ' ')
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".");

        let suffix: u32 = rng.gen_range(1..9999);
        let domain = if self.config.email_domains.is_empty() {
            "example.com"
        } else {
            &self.config.email_domains[rng.gen_range(0..self.config.email_domains.len())]
        };

        format!("{normalized}{suffix}@{domain}")
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_user() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let user = user_gen.generate(Role::Customer, &mut rng);

        assert_eq!(user.role, Role::Customer);
        assert!(!user.name.is_empty());
        assert!(!user.username.is_empty());
        assert!(user.email.contains('@'));
    }

    #[test]
    fn test_generate_batch() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let users = user_gen.generate_batch(Role::BusinessOwner, 10, &mut rng);

        assert_eq!(users.len(), 10);
        assert!(users.iter().all(|u| u.role == Role::BusinessOwner));

        // All UUIDs should be unique
        let ids: std::collections::HashSet<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_email_falls_back_without_domains() {
        let user_gen = UserGenerator::with_config(UserGenConfig {
            phone_fill_rate: 0.0,
            email_domains: Vec::new(),
        });
        let mut rng = rand::thread_rng();
        let user = user_gen.generate(Role::Customer, &mut rng);

        assert!(user.email.ends_with("@example.com"));
        assert!(user.phone.is_none());
    }
}
