//! # API crate: fullstack server functions for the notes app
//!
//! Defines every Dioxus server function the apps call, the Postgres access they
//! run on, and [`RemoteBackend`], the client-side implementation of the `store`
//! collaborator traits that forwards to those functions.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | Password hashing, session user lookup |
//! | [`db`] | `server` | PostgreSQL pool and row types |
//! | [`models`] | none | `User` (server) and the client-safe `UserInfo` |
//! | [`rules`] | none | Access and validation rules every write is checked against |
//! | [`settings`] | `server` | Layered server settings |
//! | [`remote`] | none | [`RemoteBackend`] |
//!
//! ## Server functions
//!
//! Every public server function is compiled twice: with the full logic behind
//! `#[cfg(feature = "server")]`, and as a client stub that forwards the call over
//! HTTP.
//!
//! - **Authentication** (here): `get_current_user`, `register`, `login_password`, `logout`
//! - **Notes** ([`notes`]): `insert_note`, `get_note`, `update_note`, `delete_note`, `query_notes`
//! - **Categories** ([`categories`]): `insert_category`, `categories_owned_by`, `delete_category`
//! - **Profiles** ([`profiles`]): `profiles_by_username`, `profiles_by_uid`, `upsert_profile`
//! - **Blobs** ([`blobs`]): `upload_blob`

use dioxus::prelude::*;

pub mod auth;
pub mod blobs;
pub mod categories;
pub mod db;
pub mod models;
pub mod notes;
pub mod profiles;
pub mod remote;
pub mod rules;
#[cfg(feature = "server")]
pub mod settings;

pub use blobs::*;
pub use categories::*;
pub use models::UserInfo;
pub use notes::*;
pub use profiles::*;
pub use remote::RemoteBackend;

#[cfg(feature = "server")]
pub(crate) fn server_error(e: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

/// Parse a record id, treating anything that is not a UUID as a missing record.
#[cfg(feature = "server")]
pub(crate) fn parse_id(id: &str) -> Option<uuid::Uuid> {
    uuid::Uuid::parse_str(id).ok()
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let Some(user_id) = auth::session_user(&session).await? else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Register a new account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/register", session: tower_sessions::Session)]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::rules::{check_registration, ApiError};

    let (email, name) = check_registration(&email, &password, &name).map_err(server_error)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(server_error(ApiError::EmailTaken));
    }

    let password_hash = auth::hash_password(&password).map_err(server_error)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!("Registered user {}", user.id);
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/register")]
pub async fn register(
    email: String,
    password: String,
    name: String,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;
    use crate::rules::ApiError;

    let email = email.trim().to_lowercase();

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(server_error(ApiError::BadCredentials));
    };

    let valid = auth::verify_password(&password, &user.password_hash).map_err(server_error)?;
    if !valid {
        tracing::warn!("Failed login for {}", user.id);
        return Err(server_error(ApiError::BadCredentials));
    }

    session
        .insert(auth::SESSION_USER_ID_KEY, user.id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
