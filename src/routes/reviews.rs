use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::reviews::CreateReviewRequest,
    error::AppResult,
    models::Review,
    services::review_service,
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewMutationResponse {
    pub message: String,
    pub review: Review,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_review))
        .route("/{product_id}", get(list_reviews))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Create review", body = ReviewMutationResponse),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewMutationResponse>)> {
    let review = review_service::add_review(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReviewMutationResponse {
            message: "review added".to_string(),
            review,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "List reviews for a product", body = Vec<Review>)
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<Vec<Review>>> {
    let reviews = review_service::list_reviews(&state, product_id).await?;
    Ok(Json(reviews))
}
