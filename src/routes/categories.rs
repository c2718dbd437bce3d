use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, models::Category, services::catalog_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List categories", body = Vec<Category>)
    ),
    tag = "Categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let categories = catalog_service::list_categories(&state).await?;
    Ok(Json(categories))
}
