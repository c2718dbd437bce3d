use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    dto::reviews::CreateReviewRequest,
    entity::{
        products::Entity as Products,
        reviews::{
            ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews,
            Model as ReviewModel,
        },
    },
    error::{AppError, AppResult},
    models::Review,
    state::AppState,
};

pub async fn add_review(state: &AppState, payload: CreateReviewRequest) -> AppResult<Review> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer_name is required".to_string()));
    }

    let product = Products::find_by_id(payload.product_id).one(&state.orm).await?;
    if product.is_none() {
        return Err(AppError::NotFound);
    }

    let review = ReviewActive {
        id: NotSet,
        product_id: Set(payload.product_id),
        customer_name: Set(payload.customer_name),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(review_from_entity(review))
}

/// All reviews for a product; an unknown product id yields an empty list.
pub async fn list_reviews(state: &AppState, product_id: i32) -> AppResult<Vec<Review>> {
    let rows = Reviews::find()
        .filter(ReviewCol::ProductId.eq(product_id))
        .order_by_asc(ReviewCol::Id)
        .all(&state.orm)
        .await?;
    Ok(rows.into_iter().map(review_from_entity).collect())
}

fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        product_id: model.product_id,
        customer_name: model.customer_name,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
