use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::products::{CreateProductRequest, UpdateProductRequest},
    error::{AppError, AppResult},
    models::Product,
    services::{admin_service, catalog_service},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductListQuery {
    /// Kept as text so `?category_id=` (an empty value) means "no filter".
    pub category_id: Option<String>,
}

impl ProductListQuery {
    fn category_id(&self) -> AppResult<Option<i32>> {
        match self.category_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i32>()
                .map(Some)
                .map_err(|_| AppError::Validation("invalid category_id".to_string())),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductMutationResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(list_products).post(create_product))
        .route(
            "/{id}",
            axum::routing::get(get_product)
                .put(update_product)
                .delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("category_id" = Option<String>, Query, description = "Filter by category id; empty means no filter")
    ),
    responses(
        (status = 200, description = "List products", body = Vec<Product>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = catalog_service::list_products(&state, query.category_id()?).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = catalog_service::get_product(&state, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ProductMutationResponse),
        (status = 400, description = "Missing or invalid fields"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductMutationResponse>)> {
    let product = admin_service::create_product(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductMutationResponse {
            message: "product created".to_string(),
            product,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductMutationResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ProductMutationResponse>> {
    let product = admin_service::update_product(&state, id, payload).await?;
    Ok(Json(ProductMutationResponse {
        message: "product updated".to_string(),
        product,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Deleted product", body = MessageResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    admin_service::delete_product_api(&state, id).await?;
    Ok(Json(MessageResponse {
        message: "product deleted".to_string(),
    }))
}
