use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// Server-side registry of active admin sessions. A signed token is only
/// honored while its session id is registered here, so logout revokes it.
#[derive(Clone, Default)]
pub struct SessionStore {
    active: Arc<RwLock<HashSet<Uuid>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, sid: Uuid) {
        self.active.write().await.insert(sid);
    }

    pub async fn remove(&self, sid: Uuid) -> bool {
        self.active.write().await.remove(&sid)
    }

    pub async fn contains(&self, sid: Uuid) -> bool {
        self.active.read().await.contains(&sid)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub sid: Uuid,
    pub exp: usize,
}

pub fn issue_token(secret: &str, username: &str, sid: Uuid) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(12))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("failed to set expiration")))?;

    let claims = Claims {
        sub: username.to_string(),
        sid,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

/// Authenticated admin session resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    pub sid: Uuid,
}

/// Rejection for admin routes: an unauthenticated request is redirected to
/// the login page instead of surfacing an error.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_token(parts)
            .and_then(|token| decode_token(&state.config.session_secret, token))
            .ok_or(LoginRedirect)?;

        if !state.sessions.contains(claims.sid).await {
            return Err(LoginRedirect);
        }

        Ok(AdminSession {
            username: claims.sub,
            sid: claims.sid,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim)
}
