//! Saved restaurant rows.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use savor_core::Location;
use uuid::Uuid;

use crate::schema::saved_restaurants;

/// A restaurant saved by an account, with its attributes flattened into columns.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = saved_restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedRestaurant {
    pub id: Uuid,
    /// Account that saved the restaurant.
    pub account_id: Uuid,
    /// Identifier assigned by the search provider.
    pub restaurant_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    /// Timestamp when the restaurant was saved.
    pub created_at: Timestamp,
}

/// Data for saving a restaurant.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = saved_restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSavedRestaurant {
    pub id: Uuid,
    pub account_id: Uuid,
    pub restaurant_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<savor_core::SavedRestaurant> for NewSavedRestaurant {
    fn from(saved: savor_core::SavedRestaurant) -> Self {
        Self {
            id: saved.id,
            account_id: saved.user_id,
            restaurant_id: saved.restaurant_id,
            name: saved.name,
            rating: saved.rating,
            review_count: saved.review_count,
            address1: saved.location.address1,
            city: saved.location.city,
            state: saved.location.state,
            phone: saved.phone,
            image_url: saved.image_url,
            created_at: saved.saved_at.into(),
        }
    }
}

impl From<SavedRestaurant> for savor_core::SavedRestaurant {
    fn from(row: SavedRestaurant) -> Self {
        Self {
            id: row.id,
            user_id: row.account_id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            rating: row.rating,
            review_count: row.review_count,
            location: Location {
                address1: row.address1,
                city: row.city,
                state: row.state,
            },
            phone: row.phone,
            image_url: row.image_url,
            saved_at: row.created_at.into(),
        }
    }
}
