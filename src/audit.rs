use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, Set};
use serde_json::Value;

use crate::{entity::audit_logs::ActiveModel as AuditActive, error::AppResult, state::AppState};

/// Append one audit trail row. `actor` is the admin username, or None for
/// mutations arriving through the unauthenticated JSON API.
pub async fn log_audit(
    state: &AppState,
    actor: Option<&str>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    AuditActive {
        id: NotSet,
        actor: Set(actor.map(str::to_string)),
        action: Set(action.to_string()),
        resource: Set(resource.map(str::to_string)),
        metadata: Set(metadata),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(())
}
