use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown when a review comes back without a reviewer.
pub const ANONYMOUS_REVIEWER: &str = "Anonymous";

/// Account role, stored as text in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    BusinessOwner,
}

impl Role {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::BusinessOwner => "business_owner",
        }
    }
}

/// Lifecycle of a booking, stored as text in `bookings.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// Standard response wrapper used by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reviewer {
    pub fn anonymous() -> Self {
        Self {
            username: ANONYMOUS_REVIEWER.to_string(),
            extra: Map::new(),
        }
    }
}

/// A review as returned by the API, before normalization.
///
/// Fields the client does not model are kept in `extra` so they survive
/// normalization untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "businessId")]
    pub business: Option<String>,
    /// Taken as sent. Some records carry half stars, some none at all.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A review ready for display. Always has a reviewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub business: Option<String>,
    pub rating: Option<f64>,
    pub comment: Option<String>,
    pub reviewer: Reviewer,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        Self {
            id: raw.id,
            business: raw.business,
            rating: raw.rating,
            comment: raw.comment,
            reviewer: raw.reviewer.unwrap_or_else(Reviewer::anonymous),
            extra: raw.extra,
        }
    }
}
