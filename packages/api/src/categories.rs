//! Category server functions. Categories are private to their owner.

use dioxus::prelude::*;
use store::documents::CategoryDocument;
use store::NewCategory;

#[cfg(feature = "server")]
use crate::{
    auth::require_user,
    db::{get_pool, CategoryRow},
    parse_id, rules, server_error,
};

#[cfg(feature = "server")]
#[post("/api/categories/insert", session: tower_sessions::Session)]
pub async fn insert_category(category: NewCategory) -> Result<CategoryDocument, ServerFnError> {
    let user_id = require_user(&session).await?;
    rules::check_new_category(&user_id.to_string(), &category).map_err(server_error)?;

    let pool = get_pool().await.map_err(server_error)?;
    let row: CategoryRow = sqlx::query_as(
        "INSERT INTO categories (owner_id, name, color) VALUES ($1, $2, $3)
         RETURNING id, owner_id, name, color",
    )
    .bind(user_id)
    .bind(category.name.trim())
    .bind(&category.color)
    .fetch_one(pool)
    .await
    .map_err(server_error)?;

    tracing::info!("Created category {} for {}", row.id, user_id);
    Ok(row.into())
}

#[cfg(not(feature = "server"))]
#[post("/api/categories/insert")]
pub async fn insert_category(category: NewCategory) -> Result<CategoryDocument, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/categories/owned", session: tower_sessions::Session)]
pub async fn categories_owned_by(owner_id: String) -> Result<Vec<CategoryDocument>, ServerFnError> {
    let user_id = require_user(&session).await?;
    if owner_id != user_id.to_string() {
        return Err(server_error(rules::ApiError::ForeignQuery));
    }

    let pool = get_pool().await.map_err(server_error)?;
    let rows: Vec<CategoryRow> = sqlx::query_as(
        "SELECT id, owner_id, name, color FROM categories WHERE owner_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(server_error)?;

    Ok(rows.into_iter().map(CategoryDocument::from).collect())
}

#[cfg(not(feature = "server"))]
#[post("/api/categories/owned")]
pub async fn categories_owned_by(owner_id: String) -> Result<Vec<CategoryDocument>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a category. Notes that reference it are not touched.
#[cfg(feature = "server")]
#[post("/api/categories/delete", session: tower_sessions::Session)]
pub async fn delete_category(id: String) -> Result<(), ServerFnError> {
    let user_id = require_user(&session).await?;
    let not_found = || server_error(rules::ApiError::NotFound("category"));
    let id = parse_id(&id).ok_or_else(not_found)?;

    let pool = get_pool().await.map_err(server_error)?;
    let owner: Option<(uuid::Uuid,)> =
        sqlx::query_as("SELECT owner_id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(server_error)?;
    let Some((owner,)) = owner else {
        return Err(not_found());
    };
    rules::check_owner(&owner.to_string(), &user_id.to_string(), "category")
        .map_err(server_error)?;

    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(server_error)?;

    tracing::info!("Deleted category {}", id);
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/categories/delete")]
pub async fn delete_category(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
