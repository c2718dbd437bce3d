use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, session::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
}
