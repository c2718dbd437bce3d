use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum::extract::Form;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::orders::CheckoutForm,
    error::AppResult,
    models::{Category, Order, PaymentMethod, Product, Review},
    services::{catalog_service, order_service, review_service},
    state::AppState,
};

/// Payload the product-listing pages render from.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub product: Product,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalePage {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutPage {
    pub payment_methods: Vec<PaymentMethod>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/category/{name}", get(category))
        .route("/product/{id}", get(product_detail))
        .route("/cart", get(cart))
        .route("/checkout", get(checkout_page).post(checkout))
        .route("/checkout/success/{order_id}", get(checkout_success))
        .route("/sale", get(sale))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All products and categories", body = CatalogPage)
    ),
    tag = "Storefront"
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<CatalogPage>> {
    let products = catalog_service::list_products(&state, None).await?;
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(CatalogPage {
        products,
        categories,
        selected_category: None,
    }))
}

#[utoipa::path(
    get,
    path = "/category/{name}",
    params(
        ("name" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Products of the category", body = CatalogPage),
        (status = 303, description = "Unknown category, back to the default listing"),
    ),
    tag = "Storefront"
)]
pub async fn category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Response> {
    let products = match catalog_service::products_by_category_name(&state, &name).await? {
        Some(products) => products,
        None => return Ok(Redirect::to("/").into_response()),
    };
    let categories = catalog_service::list_categories(&state).await?;
    let page = CatalogPage {
        products,
        categories,
        selected_category: Some(name),
    };
    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product detail with reviews", body = ProductPage),
        (status = 303, description = "Unknown product, back to the listing"),
    ),
    tag = "Storefront"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let product = match catalog_service::get_product(&state, id).await {
        Ok(product) => product,
        Err(crate::error::AppError::NotFound) => return Ok(Redirect::to("/").into_response()),
        Err(err) => return Err(err),
    };
    let reviews = review_service::list_reviews(&state, id).await?;
    Ok(Json(ProductPage { product, reviews }).into_response())
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart page; the cart itself lives client-side")
    ),
    tag = "Storefront"
)]
pub async fn cart() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

#[utoipa::path(
    get,
    path = "/checkout",
    responses(
        (status = 200, description = "Checkout page payload", body = CheckoutPage)
    ),
    tag = "Storefront"
)]
pub async fn checkout_page() -> Json<CheckoutPage> {
    Json(CheckoutPage {
        payment_methods: vec![
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Promptpay,
            PaymentMethod::MobileBanking,
            PaymentMethod::BankTransfer,
            PaymentMethod::Cod,
        ],
    })
}

#[utoipa::path(
    post,
    path = "/checkout",
    request_body(content = CheckoutForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Order placed, redirect to the success page"),
        (status = 400, description = "Empty cart or invalid payload"),
    ),
    tag = "Storefront"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> AppResult<Redirect> {
    let order_id = order_service::place_order(&state, form).await?;
    Ok(Redirect::to(&format!("/checkout/success/{order_id}")))
}

#[utoipa::path(
    get,
    path = "/checkout/success/{order_id}",
    params(
        ("order_id" = i32, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order confirmation", body = Order),
        (status = 303, description = "Unknown order, back to the listing"),
    ),
    tag = "Storefront"
)]
pub async fn checkout_success(
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> AppResult<Response> {
    match order_service::get_order(&state, order_id).await {
        Ok(order) => Ok(Json(order).into_response()),
        Err(crate::error::AppError::NotFound) => Ok(Redirect::to("/").into_response()),
        Err(err) => Err(err),
    }
}

#[utoipa::path(
    get,
    path = "/sale",
    responses(
        (status = 200, description = "Products with an active discount", body = SalePage)
    ),
    tag = "Storefront"
)]
pub async fn sale(State(state): State<AppState>) -> AppResult<Json<SalePage>> {
    let products = catalog_service::sale_products(&state).await?;
    Ok(Json(SalePage { products }))
}
