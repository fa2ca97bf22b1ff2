//! Saved restaurant response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Address of a saved restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    /// Street address.
    pub address1: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
}

/// A restaurant saved to a user's list.
///
/// Restaurant fields keep the search provider's snake_case names.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SavedRestaurant {
    /// Unique identifier of the saved record.
    #[serde(rename = "_id")]
    pub record_id: Uuid,
    /// Identifier of the user owning the list.
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// Third-party identifier of the restaurant.
    pub id: String,
    /// Name of the restaurant.
    pub name: String,
    /// Average rating reported by the provider.
    pub rating: Option<f64>,
    /// Number of reviews reported by the provider.
    pub review_count: Option<i64>,
    /// Address of the restaurant.
    pub location: Location,
    /// Phone number.
    pub phone: Option<String>,
    /// Picture of the restaurant.
    pub image_url: Option<String>,
    /// Timestamp when the restaurant was saved.
    #[serde(rename = "savedAt")]
    pub saved_at: Timestamp,
}

/// Saved restaurants of one user, oldest first.
pub type SavedRestaurants = Vec<SavedRestaurant>;

/// Plain confirmation message.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    /// Human-readable confirmation.
    pub message: String,
}

impl From<savor_core::SavedRestaurant> for SavedRestaurant {
    fn from(saved: savor_core::SavedRestaurant) -> Self {
        Self {
            record_id: saved.id,
            user_id: saved.user_id,
            id: saved.restaurant_id,
            name: saved.name,
            rating: saved.rating,
            review_count: saved.review_count,
            location: Location {
                address1: saved.location.address1,
                city: saved.location.city,
                state: saved.location.state,
            },
            phone: saved.phone,
            image_url: saved.image_url,
            saved_at: saved.saved_at,
        }
    }
}
