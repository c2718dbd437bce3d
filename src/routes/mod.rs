use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod categories;
pub mod doc;
pub mod health;
pub mod products;
pub mod reviews;
pub mod storefront;

// Build the router without binding state; it will be provided at the top level.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(storefront::router())
        .merge(auth::router())
        .nest("/api/products", products::router())
        .nest("/api/categories", categories::router())
        .nest("/api/reviews", reviews::router())
        .nest("/admin", admin::router())
}
