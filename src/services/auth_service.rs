use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::auth::{LoginForm, LoginResponse},
    error::{AppError, AppResult},
    session::{self, AdminSession},
    state::AppState,
};

/// Check the configured admin credential pair, register a session and sign
/// its token. The failure message never reveals which field was wrong.
pub async fn login(state: &AppState, form: LoginForm) -> AppResult<LoginResponse> {
    let config = &state.config;
    if form.username != config.admin_username || form.password != config.admin_password {
        return Err(AppError::Unauthorized);
    }

    let sid = Uuid::new_v4();
    state.sessions.insert(sid).await;
    let token = session::issue_token(&config.session_secret, &form.username, sid)?;

    if let Err(err) = log_audit(state, Some(form.username.as_str()), "admin_login", None, None).await {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(LoginResponse { token })
}

/// Remove the presented session from the registry, revoking its token.
pub async fn logout(state: &AppState, session: &AdminSession) {
    state.sessions.remove(session.sid).await;

    if let Err(err) =
        log_audit(state, Some(session.username.as_str()), "admin_logout", None, None).await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
}
