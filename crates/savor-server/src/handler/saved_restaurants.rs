//! Saved restaurant handlers.
//!
//! Each user keeps a list of restaurants copied from third-party search
//! results. Route names follow the paths existing clients already call.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use savor_core::{NewSavedRestaurant, Storage};
use uuid::Uuid;

use crate::extract::{Json, Query};
use crate::handler::request::{DeleteRestaurantQuery, SaveRestaurant, SavedRestaurantsQuery};
use crate::handler::response::{ErrorResponse, Message, SavedRestaurant, SavedRestaurants};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for saved restaurant operations.
const TRACING_TARGET: &str = "savor_server::handler::saved_restaurants";

/// Parses a required user id taken from a body or query string.
fn parse_user_id(raw: Option<&str>) -> Result<Uuid> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty()).ok_or_else(|| {
        ErrorKind::BadRequest.with_message("userId is required")
    })?;

    Uuid::parse_str(raw)
        .map_err(|_| ErrorKind::BadRequest.with_message("userId must be a valid identifier"))
}

/// Saves a restaurant to a user's list.
#[tracing::instrument(skip_all, fields(restaurant_id = %request.id))]
async fn save_restaurant(
    State(storage): State<Storage>,
    Json(request): Json<SaveRestaurant>,
) -> Result<(StatusCode, Json<SavedRestaurant>)> {
    tracing::debug!(target: TRACING_TARGET, "Saving restaurant");

    let (user_id, snapshot) = request.into_parts();
    let user_id = parse_user_id(Some(&user_id))?;
    let new_saved = NewSavedRestaurant::new(user_id, snapshot)?;

    let saved = storage
        .saved_restaurants
        .save_restaurant(new_saved.into_saved_restaurant())
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %saved.user_id,
        record_id = %saved.id,
        "Restaurant saved",
    );

    Ok((StatusCode::CREATED, Json(saved.into())))
}

fn save_restaurant_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Save restaurant")
        .description(
            "Copies a restaurant into a user's saved list. Saving a restaurant \
             that is already on the list returns the existing record.",
        )
        .response::<201, Json<SavedRestaurant>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Lists a user's saved restaurants.
#[tracing::instrument(skip_all)]
async fn list_saved_restaurants(
    State(storage): State<Storage>,
    Query(query): Query<SavedRestaurantsQuery>,
) -> Result<(StatusCode, Json<SavedRestaurants>)> {
    let user_id = parse_user_id(query.user_id.as_deref())?;
    let saved = storage
        .saved_restaurants
        .list_saved_restaurants(user_id)
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        account_id = %user_id,
        restaurant_count = saved.len(),
        "Saved restaurants listed",
    );

    let saved = saved.into_iter().map(SavedRestaurant::from).collect();
    Ok((StatusCode::OK, Json(saved)))
}

fn list_saved_restaurants_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List saved restaurants")
        .description("Returns the restaurants a user saved, oldest first.")
        .response::<200, Json<SavedRestaurants>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Removes a restaurant from a user's list.
#[tracing::instrument(skip_all)]
async fn delete_restaurant(
    State(storage): State<Storage>,
    Query(query): Query<DeleteRestaurantQuery>,
) -> Result<(StatusCode, Json<Message>)> {
    let restaurant_id = query
        .restaurant_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let (Some(_), Some(restaurant_id)) = (query.user_id.as_deref(), restaurant_id) else {
        return Err(ErrorKind::BadRequest.with_message("userId and restaurantId are required"));
    };
    let user_id = parse_user_id(query.user_id.as_deref())?;

    let deleted = storage
        .saved_restaurants
        .delete_saved_restaurant(user_id, restaurant_id)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        account_id = %user_id,
        restaurant_id,
        deleted,
        "Saved restaurant removed",
    );

    let message = Message {
        message: "Restaurant deleted successfully".to_owned(),
    };
    Ok((StatusCode::OK, Json(message)))
}

fn delete_restaurant_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete saved restaurant")
        .description("Removes a restaurant from a user's saved list. Removing a restaurant that is not on the list succeeds.")
        .response::<200, Json<Message>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all saved restaurant routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/saveRestaurant",
            post_with(save_restaurant, save_restaurant_docs),
        )
        .api_route(
            "/getSavedRestaurants",
            get_with(list_saved_restaurants, list_saved_restaurants_docs),
        )
        .api_route(
            "/deleteRestaurant",
            delete_with(delete_restaurant, delete_restaurant_docs),
        )
        .with_path_items(|item| item.tag("Saved restaurants"))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    fn taqueria(user_id: Uuid) -> Value {
        json!({
            "userId": user_id,
            "id": "yelp-taqueria",
            "name": "Taqueria",
            "rating": 4.5,
            "review_count": 120,
            "location": { "address1": "1 Main St", "city": "Springfield", "state": "IL" },
            "phone": "+15550100",
            "image_url": "https://img.example.com/taqueria.jpg"
        })
    }

    #[tokio::test]
    async fn save_list_and_delete() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;
        let user_id = Uuid::now_v7();

        let response = server.post("/saveRestaurant").json(&taqueria(user_id)).await;
        response.assert_status(StatusCode::CREATED);
        let saved = response.json::<Value>();
        assert_eq!(saved["userId"], json!(user_id));
        assert_eq!(saved["id"], "yelp-taqueria");
        assert_eq!(saved["review_count"], 120);
        assert_eq!(saved["location"]["city"], "Springfield");
        assert!(saved["_id"].is_string());

        let listed = server
            .get("/getSavedRestaurants")
            .add_query_param("userId", user_id)
            .await
            .json::<SavedRestaurants>();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Taqueria");

        let response = server
            .delete("/deleteRestaurant")
            .add_query_param("userId", user_id)
            .add_query_param("restaurantId", "yelp-taqueria")
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Restaurant deleted successfully" }));

        let listed = server
            .get("/getSavedRestaurants")
            .add_query_param("userId", user_id)
            .await
            .json::<SavedRestaurants>();
        assert!(listed.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn saving_twice_returns_the_existing_record() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;
        let user_id = Uuid::now_v7();

        let first = server
            .post("/saveRestaurant")
            .json(&taqueria(user_id))
            .await
            .json::<SavedRestaurant>();
        let second = server
            .post("/saveRestaurant")
            .json(&taqueria(user_id))
            .await
            .json::<SavedRestaurant>();
        assert_eq!(first, second);

        let other_user = server
            .post("/saveRestaurant")
            .json(&taqueria(Uuid::now_v7()))
            .await
            .json::<SavedRestaurant>();
        assert_ne!(other_user.record_id, first.record_id);

        let listed = server
            .get("/getSavedRestaurants")
            .add_query_param("userId", user_id)
            .await
            .json::<SavedRestaurants>();
        assert_eq!(listed.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_parameters_are_bad_requests() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/getSavedRestaurants").await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "userId is required" }));

        let response = server
            .delete("/deleteRestaurant")
            .add_query_param("userId", Uuid::now_v7())
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "userId and restaurantId are required" }));

        let response = server
            .post("/saveRestaurant")
            .json(&json!({ "id": "yelp-1", "name": "Diner" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "userId is required" }));

        server
            .get("/getSavedRestaurants")
            .add_query_param("userId", "not-a-uuid")
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn deleting_an_unsaved_restaurant_succeeds() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        server
            .delete("/deleteRestaurant")
            .add_query_param("userId", Uuid::now_v7())
            .add_query_param("restaurantId", "never-saved")
            .await
            .assert_status_ok();
        Ok(())
    }
}
