//! Saved restaurant request types.
//!
//! Restaurant fields keep the snake_case names of the search provider
//! payload they are copied from.

use savor_core::{Location, RestaurantSnapshot};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Address of a restaurant.
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LocationBody {
    /// Street address.
    pub address1: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
}

/// Request payload for saving a restaurant to a user's list.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SaveRestaurant {
    /// Identifier of the user saving the restaurant.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Third-party identifier of the restaurant.
    pub id: String,
    /// Name of the restaurant.
    pub name: String,
    /// Average rating reported by the provider.
    pub rating: Option<f64>,
    /// Number of reviews reported by the provider.
    pub review_count: Option<i64>,
    /// Address of the restaurant.
    pub location: Option<LocationBody>,
    /// Phone number.
    pub phone: Option<String>,
    /// Picture of the restaurant.
    pub image_url: Option<String>,
}

impl SaveRestaurant {
    /// Splits the payload into the raw user id and the restaurant snapshot.
    pub fn into_parts(self) -> (String, RestaurantSnapshot) {
        let location = self.location.unwrap_or_default();
        let snapshot = RestaurantSnapshot {
            restaurant_id: self.id,
            name: self.name,
            rating: self.rating,
            review_count: self.review_count,
            location: Location {
                address1: location.address1,
                city: location.city,
                state: location.state,
            },
            phone: self.phone,
            image_url: self.image_url,
        };
        (self.user_id, snapshot)
    }
}

/// Query parameters for listing saved restaurants.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedRestaurantsQuery {
    /// Identifier of the user whose list is returned.
    pub user_id: Option<String>,
}

/// Query parameters for removing a saved restaurant.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRestaurantQuery {
    /// Identifier of the user owning the list.
    pub user_id: Option<String>,
    /// Third-party identifier of the restaurant.
    pub restaurant_id: Option<String>,
}
