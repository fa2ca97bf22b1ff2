//! Comment and reply handlers for reviews and restaurants.
//!
//! Both parent kinds share one comment shape: every listing returns each
//! comment with its replies embedded, in a single storage round trip.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use savor_core::{CommentService, ParentKind};

use crate::extract::{Json, Path, Query};
use crate::handler::request::{
    CommentPathParams, CreateComment, CreateReply, ListParams, RestaurantPathParams,
    ReviewPathParams,
};
use crate::handler::response::{Comment, Comments, ErrorResponse, Replies, Reply};
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for comment operations.
const TRACING_TARGET: &str = "savor_server::handler::comments";

async fn create_comment(
    comments: &CommentService,
    parent_kind: ParentKind,
    parent_id: &str,
    request: CreateComment,
) -> Result<(StatusCode, Json<Comment>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating comment");

    let comment = comments
        .create_comment(parent_kind, parent_id, &request.name, &request.text)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        comment_id = %comment.id,
        "Comment created",
    );

    Ok((StatusCode::CREATED, Json(comment.into())))
}

async fn list_comments(
    comments: &CommentService,
    parent_kind: ParentKind,
    parent_id: &str,
    params: ListParams,
) -> Result<(StatusCode, Json<Comments>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing comments");

    let listed = comments
        .list_comments(parent_kind, parent_id, params.limit)
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        comment_count = listed.len(),
        "Comments listed",
    );

    let listed = listed.into_iter().map(Comment::from).collect();
    Ok((StatusCode::OK, Json(listed)))
}

/// Creates a comment on a review.
#[tracing::instrument(skip_all, fields(review_id = %path_params.review_id))]
async fn post_review_comment(
    State(comments): State<CommentService>,
    Path(path_params): Path<ReviewPathParams>,
    Json(request): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>)> {
    create_comment(&comments, ParentKind::Review, &path_params.review_id, request).await
}

fn post_review_comment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Comment on review")
        .description("Creates a comment on a review. The comment starts with no replies.")
        .response::<201, Json<Comment>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns the comments of a review, newest first.
#[tracing::instrument(skip_all, fields(review_id = %path_params.review_id))]
async fn list_review_comments(
    State(comments): State<CommentService>,
    Path(path_params): Path<ReviewPathParams>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Comments>)> {
    list_comments(&comments, ParentKind::Review, &path_params.review_id, params).await
}

fn list_review_comments_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List review comments")
        .description("Returns the comments of a review, newest first, each with its replies oldest first.")
        .response::<200, Json<Comments>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Creates a comment on a restaurant.
#[tracing::instrument(skip_all, fields(restaurant_id = %path_params.restaurant_id))]
async fn post_restaurant_comment(
    State(comments): State<CommentService>,
    Path(path_params): Path<RestaurantPathParams>,
    Json(request): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>)> {
    create_comment(
        &comments,
        ParentKind::Restaurant,
        &path_params.restaurant_id,
        request,
    )
    .await
}

fn post_restaurant_comment_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Comment on restaurant")
        .description("Creates a comment on a restaurant identified by its search provider id.")
        .response::<201, Json<Comment>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns the comments of a restaurant, newest first.
#[tracing::instrument(skip_all, fields(restaurant_id = %path_params.restaurant_id))]
async fn list_restaurant_comments(
    State(comments): State<CommentService>,
    Path(path_params): Path<RestaurantPathParams>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Comments>)> {
    list_comments(
        &comments,
        ParentKind::Restaurant,
        &path_params.restaurant_id,
        params,
    )
    .await
}

fn list_restaurant_comments_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List restaurant comments")
        .description("Returns the comments of a restaurant, newest first, each with its replies oldest first.")
        .response::<200, Json<Comments>>()
        .response::<400, Json<ErrorResponse>>()
}

/// Appends a reply to a comment.
#[tracing::instrument(skip_all, fields(comment_id = %path_params.comment_id))]
async fn post_reply(
    State(comments): State<CommentService>,
    Path(path_params): Path<CommentPathParams>,
    Json(request): Json<CreateReply>,
) -> Result<(StatusCode, Json<Comment>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating reply");

    let comment = comments
        .create_reply(&path_params.comment_id, &request.name, &request.text)
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        reply_count = comment.replies.len(),
        "Reply created",
    );

    Ok((StatusCode::CREATED, Json(comment.into())))
}

fn post_reply_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Reply to comment")
        .description("Appends a reply to a comment and returns the whole comment with its replies.")
        .response::<201, Json<Comment>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns the replies of a comment, oldest first.
#[tracing::instrument(skip_all, fields(comment_id = %path_params.comment_id))]
async fn list_replies(
    State(comments): State<CommentService>,
    Path(path_params): Path<CommentPathParams>,
) -> Result<(StatusCode, Json<Replies>)> {
    tracing::debug!(target: TRACING_TARGET, "Listing replies");

    let replies = comments.list_replies(&path_params.comment_id).await?;
    let replies = replies.into_iter().map(Reply::from).collect();
    Ok((StatusCode::OK, Json(replies)))
}

fn list_replies_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List replies")
        .description("Returns the replies of a comment, oldest first.")
        .response::<200, Json<Replies>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all comment and reply routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/reviews/{reviewId}/comments",
            post_with(post_review_comment, post_review_comment_docs)
                .get_with(list_review_comments, list_review_comments_docs),
        )
        .api_route(
            "/restaurants/{restaurantId}/comments",
            post_with(post_restaurant_comment, post_restaurant_comment_docs)
                .get_with(list_restaurant_comments, list_restaurant_comments_docs),
        )
        .api_route(
            "/comments/{commentId}/replies",
            post_with(post_reply, post_reply_docs).get_with(list_replies, list_replies_docs),
        )
        .with_path_items(|item| item.tag("Comments"))
}

#[cfg(test)]
mod tests {
    use std::future::IntoFuture;

    use futures::future::join_all;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;
    use crate::handler::test::{create_test_server_with_router, create_test_server_with_store};
    use crate::service::ServiceConfig;

    #[tokio::test]
    async fn comment_reply_and_listing_scenario() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/reviews/r1/comments")
            .json(&json!({ "name": "Alice", "text": "Great spot" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let comment = response.json::<Value>();
        assert_eq!(comment["name"], "Alice");
        assert_eq!(comment["text"], "Great spot");
        assert_eq!(comment["replies"], json!([]));
        assert!(comment["createdAt"].is_string());
        let comment_id = comment["_id"].as_str().unwrap_or_default().to_owned();
        assert!(Uuid::parse_str(&comment_id).is_ok());

        let response = server
            .post(&format!("/comments/{comment_id}/replies"))
            .json(&json!({ "name": "Bob", "text": "Agreed!" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let replied = response.json::<Value>();
        assert_eq!(replied["_id"], comment_id.as_str());
        assert_eq!(replied["replies"].as_array().map(Vec::len), Some(1));
        assert_eq!(replied["replies"][0]["name"], "Bob");
        assert_eq!(replied["replies"][0]["text"], "Agreed!");

        let response = server.get("/reviews/r1/comments").await;
        response.assert_status_ok();
        let listed = response.json::<Value>();
        assert_eq!(listed[0], replied);
        Ok(())
    }

    #[tokio::test]
    async fn restaurant_comments_have_the_same_shape() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let comment = server
            .post("/restaurants/yelp-abc/comments")
            .json(&json!({ "name": "Carol", "text": "Try the dumplings" }))
            .await
            .json::<Comment>();

        server
            .post(&format!("/comments/{}/replies", comment.id))
            .json(&json!({ "name": "Dan", "text": "Will do" }))
            .await
            .assert_status(StatusCode::CREATED);

        let listed = server
            .get("/restaurants/yelp-abc/comments")
            .await
            .json::<Comments>();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].replies.len(), 1);
        assert_eq!(listed[0].replies[0].name, "Dan");

        let on_review = server.get("/reviews/yelp-abc/comments").await.json::<Comments>();
        assert!(on_review.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn listing_orders_comments_and_replies() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for base in ["/reviews/r2", "/restaurants/place-2"] {
            let first = server
                .post(&format!("{base}/comments"))
                .json(&json!({ "name": "Alice", "text": "first" }))
                .await
                .json::<Comment>();
            server
                .post(&format!("{base}/comments"))
                .json(&json!({ "name": "Alice", "text": "second" }))
                .await
                .assert_status(StatusCode::CREATED);

            for text in ["one", "two", "three"] {
                server
                    .post(&format!("/comments/{}/replies", first.id))
                    .json(&json!({ "name": "Bob", "text": text }))
                    .await
                    .assert_status(StatusCode::CREATED);
            }

            let listed = server
                .get(&format!("{base}/comments"))
                .await
                .json::<Comments>();
            let texts: Vec<_> = listed.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(texts, ["second", "first"]);

            let replies: Vec<_> = listed[1].replies.iter().map(|r| r.text.as_str()).collect();
            assert_eq!(replies, ["one", "two", "three"]);

            let replies = server
                .get(&format!("/comments/{}/replies", first.id))
                .await
                .json::<Replies>();
            assert_eq!(replies, listed[1].replies);
        }
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_replies_are_not_lost() -> anyhow::Result<()> {
        const REPLIES: usize = 20;

        let server = create_test_server_with_router(|_| routes()).await?;
        let comment = server
            .post("/reviews/r3/comments")
            .json(&json!({ "name": "Alice", "text": "Great spot" }))
            .await
            .json::<Comment>();
        let path = format!("/comments/{}/replies", comment.id);

        let requests = (0..REPLIES).map(|i| {
            server
                .post(&path)
                .json(&json!({ "name": format!("user-{i}"), "text": "Agreed!" }))
                .into_future()
        });
        for response in join_all(requests).await {
            response.assert_status(StatusCode::CREATED);
        }

        let replies = server.get(&path).await.json::<Replies>();
        assert_eq!(replies.len(), REPLIES);
        Ok(())
    }

    #[tokio::test]
    async fn listing_is_one_storage_round_trip() -> anyhow::Result<()> {
        let (server, store) =
            create_test_server_with_store(|_| routes(), ServiceConfig::default()).await?;

        for i in 0..4 {
            let comment = server
                .post("/reviews/r4/comments")
                .json(&json!({ "name": "Alice", "text": format!("comment {i}") }))
                .await
                .json::<Comment>();
            for j in 0..3 {
                server
                    .post(&format!("/comments/{}/replies", comment.id))
                    .json(&json!({ "name": "Bob", "text": format!("reply {j}") }))
                    .await
                    .assert_status(StatusCode::CREATED);
            }
        }

        let before = store.metrics().round_trips();
        let listed = server.get("/reviews/r4/comments").await.json::<Comments>();
        assert_eq!(store.metrics().round_trips() - before, 1);
        assert!(listed.iter().all(|c| c.replies.len() == 3));
        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_without_writing() -> anyhow::Result<()> {
        let (server, store) =
            create_test_server_with_store(|_| routes(), ServiceConfig::default()).await?;

        let response = server
            .post("/reviews/r5/comments")
            .json(&json!({ "name": "Alice", "text": "   " }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "text is required" }));

        let response = server
            .post("/restaurants/place-5/comments")
            .json(&json!({ "text": "No name" }))
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({ "error": "name is required" }));

        let response = server
            .post("/reviews/r5/comments")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;
        response.assert_status_bad_request();

        assert_eq!(store.metrics().writes(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn reply_to_missing_comment_is_not_found() -> anyhow::Result<()> {
        let (server, store) =
            create_test_server_with_store(|_| routes(), ServiceConfig::default()).await?;

        for comment_id in [Uuid::now_v7().to_string(), "not-a-uuid".to_owned()] {
            let response = server
                .post(&format!("/comments/{comment_id}/replies"))
                .json(&json!({ "name": "Bob", "text": "Agreed!" }))
                .await;
            response.assert_status_not_found();
            response.assert_json(&json!({ "error": "Comment not found" }));

            server
                .get(&format!("/comments/{comment_id}/replies"))
                .await
                .assert_status_not_found();
        }

        assert_eq!(store.metrics().writes(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn limit_query_is_applied_and_checked() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        for i in 0..3 {
            server
                .post("/restaurants/place-6/comments")
                .json(&json!({ "name": "Alice", "text": format!("#{i}") }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let listed = server
            .get("/restaurants/place-6/comments")
            .add_query_param("limit", 2)
            .await
            .json::<Comments>();
        assert_eq!(listed.len(), 2);

        for limit in ["0", "5000", "abc"] {
            server
                .get("/restaurants/place-6/comments")
                .add_query_param("limit", limit)
                .await
                .assert_status_bad_request();
        }
        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() -> anyhow::Result<()> {
        let (server, store) =
            create_test_server_with_store(|_| routes(), ServiceConfig::default()).await?;
        store.set_available(false);

        let response = server.get("/reviews/r7/comments").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "Internal server error" }));
        Ok(())
    }

    #[tokio::test]
    async fn existing_review_can_be_required() -> anyhow::Result<()> {
        let config = ServiceConfig {
            require_existing_review: true,
            ..ServiceConfig::default()
        };
        let (server, _store) = create_test_server_with_store(|_| routes(), config).await?;

        let response = server
            .post(&format!("/reviews/{}/comments", Uuid::now_v7()))
            .json(&json!({ "name": "Alice", "text": "Hi" }))
            .await;
        response.assert_status_not_found();

        server
            .post("/restaurants/anything/comments")
            .json(&json!({ "name": "Alice", "text": "Hi" }))
            .await
            .assert_status(StatusCode::CREATED);
        Ok(())
    }
}
