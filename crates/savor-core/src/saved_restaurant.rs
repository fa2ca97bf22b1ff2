//! Per-user copies of restaurants found through third-party search.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;
use crate::text::{self, MAX_NAME_CHARS};

const MAX_RESTAURANT_ID_CHARS: usize = 128;
const MAX_FIELD_CHARS: usize = 256;
const MAX_URL_CHARS: usize = 2048;

/// Street address of a saved restaurant.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl Location {
    /// Returns `true` when no address component is set.
    pub fn is_empty(&self) -> bool {
        self.address1.is_none() && self.city.is_none() && self.state.is_none()
    }
}

/// A restaurant a user bookmarked.
///
/// The attributes are a denormalized snapshot taken when the user saved
/// it; they are never refreshed from the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRestaurant {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Identifier assigned by the search provider.
    pub restaurant_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub location: Location,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub saved_at: Timestamp,
}

/// Unvalidated restaurant attributes as submitted by the client.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RestaurantSnapshot {
    pub restaurant_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub location: Location,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

/// Validated input for saving a restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedRestaurant {
    user_id: Uuid,
    snapshot: RestaurantSnapshot,
}

impl NewSavedRestaurant {
    /// Trims every text attribute and checks the required ones.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the restaurant id or name is blank,
    /// or when any attribute is too long.
    pub fn new(user_id: Uuid, snapshot: RestaurantSnapshot) -> Result<Self> {
        let location = Location {
            address1: text::optional(
                "address1",
                snapshot.location.address1.as_deref(),
                MAX_FIELD_CHARS,
            )?,
            city: text::optional("city", snapshot.location.city.as_deref(), MAX_FIELD_CHARS)?,
            state: text::optional("state", snapshot.location.state.as_deref(), MAX_FIELD_CHARS)?,
        };

        let snapshot = RestaurantSnapshot {
            restaurant_id: text::required("id", &snapshot.restaurant_id, MAX_RESTAURANT_ID_CHARS)?,
            name: text::required("name", &snapshot.name, MAX_NAME_CHARS)?,
            rating: snapshot.rating.filter(|rating| rating.is_finite()),
            review_count: snapshot.review_count.filter(|count| *count >= 0),
            location,
            phone: text::optional("phone", snapshot.phone.as_deref(), MAX_FIELD_CHARS)?,
            image_url: text::optional("image_url", snapshot.image_url.as_deref(), MAX_URL_CHARS)?,
        };

        Ok(Self { user_id, snapshot })
    }

    #[inline]
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[inline]
    pub fn restaurant_id(&self) -> &str {
        &self.snapshot.restaurant_id
    }

    /// Assigns an identifier and save time.
    pub fn into_saved_restaurant(self) -> SavedRestaurant {
        let RestaurantSnapshot {
            restaurant_id,
            name,
            rating,
            review_count,
            location,
            phone,
            image_url,
        } = self.snapshot;

        SavedRestaurant {
            id: Uuid::now_v7(),
            user_id: self.user_id,
            restaurant_id,
            name,
            rating,
            review_count,
            location,
            phone,
            image_url,
            saved_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_are_dropped() -> anyhow::Result<()> {
        let snapshot = RestaurantSnapshot {
            restaurant_id: " yelp-123 ".into(),
            name: "Taqueria".into(),
            rating: Some(f64::NAN),
            review_count: Some(-4),
            location: Location {
                address1: Some("  ".into()),
                city: Some(" Austin ".into()),
                state: None,
            },
            phone: Some(String::new()),
            image_url: None,
        };

        let saved = NewSavedRestaurant::new(Uuid::now_v7(), snapshot)?.into_saved_restaurant();
        assert_eq!(saved.restaurant_id, "yelp-123");
        assert_eq!(saved.rating, None);
        assert_eq!(saved.review_count, None);
        assert_eq!(saved.location.address1, None);
        assert_eq!(saved.location.city.as_deref(), Some("Austin"));
        assert_eq!(saved.phone, None);
        Ok(())
    }

    #[test]
    fn restaurant_id_is_required() {
        let snapshot = RestaurantSnapshot {
            name: "Taqueria".into(),
            ..Default::default()
        };
        assert!(NewSavedRestaurant::new(Uuid::now_v7(), snapshot).is_err());
    }
}
