//! Review handlers.
//!
//! Reviews are the in-service parents of review comments.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use savor_core::{NewReview, Storage};
use uuid::Uuid;

use crate::extract::{Json, Path, Query};
use crate::handler::request::{CreateReview, ListParams, ReviewPathParams};
use crate::handler::response::{ErrorResponse, Review, Reviews};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for review operations.
const TRACING_TARGET: &str = "savor_server::handler::reviews";

/// Creates a new review.
#[tracing::instrument(skip_all)]
async fn create_review(
    State(storage): State<Storage>,
    Json(request): Json<CreateReview>,
) -> Result<(StatusCode, Json<Review>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating review");

    let review = NewReview::new(&request.name, &request.body, request.rating)?.into_review();
    let review = storage.reviews.insert_review(review).await?;

    tracing::info!(
        target: TRACING_TARGET,
        review_id = %review.id,
        rating = review.rating,
        "Review created",
    );

    Ok((StatusCode::CREATED, Json(review.into())))
}

fn create_review_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create review")
        .description("Creates a review with a whole-star rating from 1 to 5.")
        .response::<201, Json<Review>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns reviews, newest first.
#[tracing::instrument(skip_all)]
async fn list_reviews(
    State(storage): State<Storage>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Reviews>)> {
    let limit = params.resolve_limit()?;
    let reviews = storage.reviews.list_reviews(limit).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        review_count = reviews.len(),
        "Reviews listed",
    );

    let reviews = reviews.into_iter().map(Review::from).collect();
    Ok((StatusCode::OK, Json(reviews)))
}

fn list_reviews_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List reviews")
        .description("Returns reviews, newest first.")
        .response::<200, Json<Reviews>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns a single review.
#[tracing::instrument(skip_all, fields(review_id = %path_params.review_id))]
async fn read_review(
    State(storage): State<Storage>,
    Path(path_params): Path<ReviewPathParams>,
) -> Result<(StatusCode, Json<Review>)> {
    let not_found = || ErrorKind::NotFound.with_message("Review not found");

    let review_id = Uuid::parse_str(&path_params.review_id).map_err(|_| not_found())?;
    let review = storage
        .reviews
        .find_review(review_id)
        .await?
        .ok_or_else(not_found)?;

    Ok((StatusCode::OK, Json(review.into())))
}

fn read_review_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get review")
        .description("Returns a single review by its identifier.")
        .response::<200, Json<Review>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all review routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/reviews",
            post_with(create_review, create_review_docs).get_with(list_reviews, list_reviews_docs),
        )
        .api_route(
            "/reviews/{reviewId}",
            get_with(read_review, read_review_docs),
        )
        .with_path_items(|item| item.tag("Reviews"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::test::create_test_server_with_router;

    #[tokio::test]
    async fn create_then_read_review() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/reviews")
            .json(&json!({ "name": " Noodle Bar ", "body": "Fresh and fast", "rating": 5 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Review>();
        assert_eq!(created.name, "Noodle Bar");
        assert_eq!(created.rating, 5);

        let read = server
            .get(&format!("/reviews/{}", created.id))
            .await
            .json::<Review>();
        assert_eq!(read, created);
        Ok(())
    }

    #[tokio::test]
    async fn reviews_are_listed_newest_first() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for name in ["First", "Second", "Third"] {
            server
                .post("/reviews")
                .json(&json!({ "name": name, "body": "Good", "rating": 4 }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let listed = server.get("/reviews").await.json::<Reviews>();
        let names: Vec<_> = listed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Third", "Second", "First"]);

        let limited = server
            .get("/reviews")
            .add_query_param("limit", 1)
            .await
            .json::<Reviews>();
        assert_eq!(limited.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_review_is_rejected() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/reviews")
            .json(&json!({ "name": "Noodle Bar", "body": "Fresh", "rating": 6 }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "rating must be between 1 and 5" }));

        let response = server
            .post("/reviews")
            .json(&json!({ "name": "Noodle Bar", "rating": 3 }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "body is required" }));

        let listed = server.get("/reviews").await.json::<Reviews>();
        assert!(listed.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_review_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for review_id in [Uuid::now_v7().to_string(), "r1".to_owned()] {
            let response = server.get(&format!("/reviews/{review_id}")).await;
            response.assert_status_not_found();
            response.assert_json(&json!({ "error": "Review not found" }));
        }
        Ok(())
    }
}
