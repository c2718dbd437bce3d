use axum::{
    Json, Router,
    extract::{Form, Path, State},
    response::Redirect,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::{categories::AdminCategoryForm, products::AdminProductForm},
    error::AppResult,
    models::{Category, Order, Product},
    services::{admin_service, catalog_service, order_service},
    session::AdminSession,
    state::AppState,
};

/// Back-office overview: everything the dashboard page renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardPage {
    pub username: String,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesPage {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddProductPage {
    pub categories: Vec<Category>,
}

// Every handler takes an AdminSession; its extractor redirects
// unauthenticated requests to /login.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/categories", get(categories_page))
        .route("/categories/add", post(add_category))
        .route("/categories/delete/{id}", post(delete_category))
        .route("/add-product", get(add_product_page).post(add_product))
        .route("/delete-product/{id}", post(delete_product))
}

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Products, categories and orders overview", body = DashboardPage),
        (status = 303, description = "Not logged in, redirect to login"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<Json<DashboardPage>> {
    let products = catalog_service::list_products(&state, None).await?;
    let categories = catalog_service::list_categories(&state).await?;
    let orders = order_service::list_orders(&state).await?;
    Ok(Json(DashboardPage {
        username: session.username,
        products,
        categories,
        orders,
    }))
}

#[utoipa::path(
    get,
    path = "/admin/categories",
    responses(
        (status = 200, description = "Category management payload", body = CategoriesPage),
        (status = 303, description = "Not logged in, redirect to login"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn categories_page(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<CategoriesPage>> {
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(CategoriesPage { categories }))
}

#[utoipa::path(
    post,
    path = "/admin/categories/add",
    request_body(content = AdminCategoryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Category created, back to the category list"),
        (status = 400, description = "Empty name"),
        (status = 409, description = "Duplicate name"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_category(
    State(state): State<AppState>,
    session: AdminSession,
    Form(form): Form<AdminCategoryForm>,
) -> AppResult<Redirect> {
    admin_service::add_category(&state, &session, form).await?;
    Ok(Redirect::to("/admin/categories"))
}

#[utoipa::path(
    post,
    path = "/admin/categories/delete/{id}",
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 303, description = "Category deleted (or already gone), back to the list"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    admin_service::delete_category(&state, &session, id).await?;
    Ok(Redirect::to("/admin/categories"))
}

#[utoipa::path(
    get,
    path = "/admin/add-product",
    responses(
        (status = 200, description = "Add-product form payload", body = AddProductPage),
        (status = 303, description = "Not logged in, redirect to login"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_product_page(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<AddProductPage>> {
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(AddProductPage { categories }))
}

#[utoipa::path(
    post,
    path = "/admin/add-product",
    request_body(content = AdminProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Product created, back to the dashboard"),
        (status = 400, description = "Missing fields or non-numeric price"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_product(
    State(state): State<AppState>,
    session: AdminSession,
    Form(form): Form<AdminProductForm>,
) -> AppResult<Redirect> {
    admin_service::add_product(&state, &session, form).await?;
    Ok(Redirect::to("/admin/dashboard"))
}

#[utoipa::path(
    post,
    path = "/admin/delete-product/{id}",
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 303, description = "Product deleted (or already gone), back to the dashboard"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    admin_service::delete_product(&state, &session, id).await?;
    Ok(Redirect::to("/admin/dashboard"))
}
