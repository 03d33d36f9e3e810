//! Profile server functions.
//!
//! Any signed-in user may look profiles up (that is how sharing by username
//! works); only the owner may write theirs.

use dioxus::prelude::*;
use store::documents::ProfileDocument;
use store::UserProfile;

#[cfg(feature = "server")]
use crate::{
    auth::require_user,
    db::{get_pool, ProfileRow},
    parse_id, rules, server_error,
};

/// Profiles whose username matches exactly (case-sensitive).
#[cfg(feature = "server")]
#[post("/api/profiles/by-username", session: tower_sessions::Session)]
pub async fn profiles_by_username(username: String) -> Result<Vec<ProfileDocument>, ServerFnError> {
    require_user(&session).await?;

    let pool = get_pool().await.map_err(server_error)?;
    let rows: Vec<ProfileRow> = sqlx::query_as(
        "SELECT id, uid, username, bio, image_url FROM user_profiles
         WHERE username = $1 ORDER BY updated_at",
    )
    .bind(&username)
    .fetch_all(pool)
    .await
    .map_err(server_error)?;

    Ok(rows.into_iter().map(ProfileDocument::from).collect())
}

#[cfg(not(feature = "server"))]
#[post("/api/profiles/by-username")]
pub async fn profiles_by_username(username: String) -> Result<Vec<ProfileDocument>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/profiles/by-uid", session: tower_sessions::Session)]
pub async fn profiles_by_uid(uid: String) -> Result<Vec<ProfileDocument>, ServerFnError> {
    require_user(&session).await?;
    let Some(uid) = parse_id(&uid) else {
        return Ok(Vec::new());
    };

    let pool = get_pool().await.map_err(server_error)?;
    let rows: Vec<ProfileRow> = sqlx::query_as(
        "SELECT id, uid, username, bio, image_url FROM user_profiles WHERE uid = $1",
    )
    .bind(uid)
    .fetch_all(pool)
    .await
    .map_err(server_error)?;

    Ok(rows.into_iter().map(ProfileDocument::from).collect())
}

#[cfg(not(feature = "server"))]
#[post("/api/profiles/by-uid")]
pub async fn profiles_by_uid(uid: String) -> Result<Vec<ProfileDocument>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create or overwrite the caller's profile.
#[cfg(feature = "server")]
#[post("/api/profiles/upsert", session: tower_sessions::Session)]
pub async fn upsert_profile(profile: UserProfile) -> Result<(), ServerFnError> {
    let user_id = require_user(&session).await?;
    rules::check_profile(&user_id.to_string(), &profile).map_err(server_error)?;

    let pool = get_pool().await.map_err(server_error)?;
    sqlx::query(
        "INSERT INTO user_profiles (uid, username, bio, image_url)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (uid) DO UPDATE SET
            username = $2,
            bio = $3,
            image_url = $4,
            updated_at = NOW()",
    )
    .bind(user_id)
    .bind(profile.username.trim())
    .bind(&profile.bio)
    .bind(&profile.image_uri)
    .execute(pool)
    .await
    .map_err(server_error)?;

    tracing::info!("Saved profile for {}", user_id);
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/profiles/upsert")]
pub async fn upsert_profile(profile: UserProfile) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
