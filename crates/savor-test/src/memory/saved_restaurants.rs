use savor_core::store::SavedRestaurantStore;
use savor_core::{Result, SavedRestaurant};
use uuid::Uuid;

use super::MemoryStore;

#[async_trait::async_trait]
impl SavedRestaurantStore for MemoryStore {
    async fn save_restaurant(&self, restaurant: SavedRestaurant) -> Result<SavedRestaurant> {
        self.write(|tables| {
            let existing = tables.saved_restaurants.iter().find(|r| {
                r.user_id == restaurant.user_id && r.restaurant_id == restaurant.restaurant_id
            });

            match existing {
                Some(existing) => (existing.clone(), false),
                None => {
                    tables.saved_restaurants.push(restaurant.clone());
                    (restaurant, true)
                }
            }
        })
        .await
    }

    async fn list_saved_restaurants(&self, user_id: Uuid) -> Result<Vec<SavedRestaurant>> {
        self.read(|tables| {
            tables
                .saved_restaurants
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn delete_saved_restaurant(&self, user_id: Uuid, restaurant_id: &str) -> Result<bool> {
        self.write(|tables| {
            let before = tables.saved_restaurants.len();
            tables
                .saved_restaurants
                .retain(|r| !(r.user_id == user_id && r.restaurant_id == restaurant_id));
            let deleted = tables.saved_restaurants.len() != before;
            (deleted, deleted)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use savor_core::{NewSavedRestaurant, RestaurantSnapshot};

    use super::*;

    fn saved(user_id: Uuid, restaurant_id: &str) -> anyhow::Result<SavedRestaurant> {
        let snapshot = RestaurantSnapshot {
            restaurant_id: restaurant_id.into(),
            name: "Taqueria".into(),
            rating: Some(4.5),
            ..Default::default()
        };
        Ok(NewSavedRestaurant::new(user_id, snapshot)?.into_saved_restaurant())
    }

    #[tokio::test]
    async fn saving_twice_keeps_one_record() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let user_id = Uuid::now_v7();

        let first = store.save_restaurant(saved(user_id, "y1")?).await?;
        let second = store.save_restaurant(saved(user_id, "y1")?).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(store.list_saved_restaurants(user_id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_scoped_to_user() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let alice = Uuid::now_v7();
        let bob = Uuid::now_v7();

        for user_id in [alice, bob] {
            store.save_restaurant(saved(user_id, "y1")?).await?;
        }

        assert!(store.delete_saved_restaurant(alice, "y1").await?);
        assert!(!store.delete_saved_restaurant(alice, "y1").await?);
        assert!(store.list_saved_restaurants(alice).await?.is_empty());
        assert_eq!(store.list_saved_restaurants(bob).await?.len(), 1);
        Ok(())
    }
}
