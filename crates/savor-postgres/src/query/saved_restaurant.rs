//! Saved restaurant repository.

use std::future::Future;

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewSavedRestaurant, SavedRestaurant};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for the restaurants each account has saved.
pub trait SavedRestaurantRepository {
    /// Saves a restaurant for an account.
    ///
    /// Saving a restaurant the account already saved returns the stored row
    /// unchanged.
    fn save_restaurant(
        &mut self,
        new_saved: NewSavedRestaurant,
    ) -> impl Future<Output = PgResult<SavedRestaurant>> + Send;

    /// Lists the restaurants an account saved, oldest first.
    fn list_saved_restaurants(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<SavedRestaurant>>> + Send;

    /// Removes a saved restaurant, returning whether a row was deleted.
    fn delete_saved_restaurant(
        &mut self,
        account_id: Uuid,
        restaurant_id: &str,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl SavedRestaurantRepository for PgConnection {
    async fn save_restaurant(&mut self, new_saved: NewSavedRestaurant) -> PgResult<SavedRestaurant> {
        use schema::saved_restaurants::{self, dsl};

        // The no-op update makes RETURNING yield the existing row on conflict.
        diesel::insert_into(saved_restaurants::table)
            .values(&new_saved)
            .on_conflict((dsl::account_id, dsl::restaurant_id))
            .do_update()
            .set(dsl::account_id.eq(excluded(dsl::account_id)))
            .returning(SavedRestaurant::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_saved_restaurants(&mut self, account_id: Uuid) -> PgResult<Vec<SavedRestaurant>> {
        use schema::saved_restaurants::{self, dsl};

        saved_restaurants::table
            .filter(dsl::account_id.eq(account_id))
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .select(SavedRestaurant::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_saved_restaurant(
        &mut self,
        account_id: Uuid,
        restaurant_id: &str,
    ) -> PgResult<bool> {
        use schema::saved_restaurants::{self, dsl};

        let deleted = diesel::delete(
            saved_restaurants::table
                .filter(dsl::account_id.eq(account_id))
                .filter(dsl::restaurant_id.eq(restaurant_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
