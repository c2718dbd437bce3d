use axum::{
    Json, Router,
    extract::{Form, State},
    response::Redirect,
    routing::get,
};

use crate::{
    dto::auth::{LoginForm, LoginResponse},
    error::AppResult,
    services::auth_service,
    session::{AdminSession, LoginRedirect},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page payload")
    ),
    tag = "Auth"
)]
pub async fn login_page() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Session token for the admin back office", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<LoginResponse>> {
    let resp = auth_service::login(&state, form).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session revoked, redirect to login")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Result<AdminSession, LoginRedirect>,
) -> Redirect {
    if let Ok(session) = session {
        auth_service::logout(&state, &session).await;
    }
    Redirect::to("/login")
}
