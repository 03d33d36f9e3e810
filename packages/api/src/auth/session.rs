//! Reading the signed-in user out of the cookie session.

use dioxus::prelude::ServerFnError;
use tower_sessions::Session;
use uuid::Uuid;

use crate::rules::ApiError;

/// Key for storing the user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The session's user id, if any.
pub async fn session_user(session: &Session) -> Result<Option<Uuid>, ServerFnError> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user_id
        .map(|id| Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string())))
        .transpose()
}

/// The session's user id, or an `Unauthenticated` error.
pub async fn require_user(session: &Session) -> Result<Uuid, ServerFnError> {
    session_user(session)
        .await?
        .ok_or_else(|| ServerFnError::new(ApiError::Unauthenticated.to_string()))
}
