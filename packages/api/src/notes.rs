//! Note server functions.
//!
//! Reads are limited to the owner and the uids in `shared_with`; a note the
//! caller may not read is reported as missing. Updates and deletes are owner
//! only. Inserts must be made as the caller and may not share with the caller.

use dioxus::prelude::*;
use store::documents::NoteDocument;
use store::{NewNote, NoteFilter, NotePatch};

#[cfg(feature = "server")]
use crate::{
    auth::require_user,
    db::{get_pool, NoteRow},
    parse_id, rules, server_error,
};

#[cfg(feature = "server")]
async fn fetch_note(pool: &sqlx::PgPool, id: uuid::Uuid) -> Result<Option<NoteRow>, ServerFnError> {
    sqlx::query_as("SELECT * FROM notes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(server_error)
}

/// Fetch a note the caller owns, or fail.
#[cfg(feature = "server")]
async fn owned_note(
    pool: &sqlx::PgPool,
    id: &str,
    user_id: uuid::Uuid,
) -> Result<NoteRow, ServerFnError> {
    let not_found = || server_error(rules::ApiError::NotFound("note"));
    let id = parse_id(id).ok_or_else(not_found)?;
    let row = fetch_note(pool, id).await?.ok_or_else(not_found)?;
    if !rules::can_read_note(&row.owner_id.to_string(), &row.shared_with, &user_id.to_string()) {
        return Err(not_found());
    }
    rules::check_owner(&row.owner_id.to_string(), &user_id.to_string(), "note").map_err(|e| {
        tracing::warn!("{} tried to change note {}", user_id, row.id);
        server_error(e)
    })?;
    Ok(row)
}

/// Create a note owned by the caller.
#[cfg(feature = "server")]
#[post("/api/notes/insert", session: tower_sessions::Session)]
pub async fn insert_note(note: NewNote) -> Result<NoteDocument, ServerFnError> {
    let user_id = require_user(&session).await?;
    rules::check_new_note(&user_id.to_string(), &note).map_err(server_error)?;

    let pool = get_pool().await.map_err(server_error)?;
    let shared_with: Vec<String> = note.shared_with.into_iter().collect();
    let row: NoteRow = sqlx::query_as(
        "INSERT INTO notes (owner_id, owner_display_name, title, description, images, category_id, shared_with)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(user_id)
    .bind(&note.owner_display_name)
    .bind(&note.title)
    .bind(&note.description)
    .bind(&note.images)
    .bind(&note.category_id)
    .bind(&shared_with)
    .fetch_one(pool)
    .await
    .map_err(server_error)?;

    tracing::info!("Created note {} for {}", row.id, user_id);
    Ok(row.into())
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/insert")]
pub async fn insert_note(note: NewNote) -> Result<NoteDocument, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// A single note, or `None` when it does not exist or the caller may not see it.
#[cfg(feature = "server")]
#[post("/api/notes/get", session: tower_sessions::Session)]
pub async fn get_note(id: String) -> Result<Option<NoteDocument>, ServerFnError> {
    let user_id = require_user(&session).await?.to_string();
    let Some(id) = parse_id(&id) else {
        return Ok(None);
    };

    let pool = get_pool().await.map_err(server_error)?;
    let row = fetch_note(pool, id).await?;
    Ok(row
        .filter(|row| rules::can_read_note(&row.owner_id.to_string(), &row.shared_with, &user_id))
        .map(NoteDocument::from))
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/get")]
pub async fn get_note(id: String) -> Result<Option<NoteDocument>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Apply a partial update. Owner only.
#[cfg(feature = "server")]
#[post("/api/notes/update", session: tower_sessions::Session)]
pub async fn update_note(id: String, patch: NotePatch) -> Result<(), ServerFnError> {
    let user_id = require_user(&session).await?;
    let pool = get_pool().await.map_err(server_error)?;
    let row = owned_note(pool, &id, user_id).await?;
    let patch = rules::sanitize_note_patch(&row.owner_id.to_string(), patch).map_err(server_error)?;

    let shared_with: Option<Vec<String>> = patch.shared_with.map(|s| s.into_iter().collect());
    sqlx::query(
        "UPDATE notes SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            images = COALESCE($4, images),
            category_id = COALESCE($5, category_id),
            shared_with = COALESCE($6, shared_with)
         WHERE id = $1",
    )
    .bind(row.id)
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(&patch.images)
    .bind(&patch.category_id)
    .bind(&shared_with)
    .execute(pool)
    .await
    .map_err(server_error)?;

    tracing::info!("Updated note {}", row.id);
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/update")]
pub async fn update_note(id: String, patch: NotePatch) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a note. Owner only.
#[cfg(feature = "server")]
#[post("/api/notes/delete", session: tower_sessions::Session)]
pub async fn delete_note(id: String) -> Result<(), ServerFnError> {
    let user_id = require_user(&session).await?;
    let pool = get_pool().await.map_err(server_error)?;
    let row = owned_note(pool, &id, user_id).await?;

    sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(row.id)
        .execute(pool)
        .await
        .map_err(server_error)?;

    tracing::info!("Deleted note {}", row.id);
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/delete")]
pub async fn delete_note(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Notes owned by, or shared with, the caller, oldest first.
#[cfg(feature = "server")]
#[post("/api/notes/query", session: tower_sessions::Session)]
pub async fn query_notes(filter: NoteFilter) -> Result<Vec<NoteDocument>, ServerFnError> {
    let user_id = require_user(&session).await?;
    rules::check_note_filter(&user_id.to_string(), &filter).map_err(server_error)?;

    let pool = get_pool().await.map_err(server_error)?;
    let rows: Vec<NoteRow> = match filter {
        NoteFilter::OwnedBy(_) => {
            sqlx::query_as("SELECT * FROM notes WHERE owner_id = $1 ORDER BY created_at")
                .bind(user_id)
                .fetch_all(pool)
                .await
        }
        NoteFilter::SharedWith(_) => {
            sqlx::query_as(
                "SELECT * FROM notes WHERE shared_with @> ARRAY[$1::TEXT] ORDER BY created_at",
            )
            .bind(user_id.to_string())
            .fetch_all(pool)
            .await
        }
    }
    .map_err(server_error)?;

    Ok(rows.into_iter().map(NoteDocument::from).collect())
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/query")]
pub async fn query_notes(filter: NoteFilter) -> Result<Vec<NoteDocument>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
