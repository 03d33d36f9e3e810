use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::documents::{CategoryDocument, NoteDocument, ProfileDocument};
use uuid::Uuid;

/// A row of `notes`.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub owner_display_name: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub category_id: String,
    pub shared_with: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<NoteRow> for NoteDocument {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: Some(row.title),
            description: Some(row.description),
            images: Some(row.images),
            owner_id: Some(row.owner_id.to_string()),
            owner_display_name: Some(row.owner_display_name),
            category_id: Some(row.category_id),
            shared_with: Some(row.shared_with),
            created_at: Some(row.created_at),
        }
    }
}

/// A row of `categories`.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub color: String,
}

impl From<CategoryRow> for CategoryDocument {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: Some(row.name),
            color: Some(row.color),
            owner_id: Some(row.owner_id.to_string()),
        }
    }
}

/// A row of `user_profiles`.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub uid: Uuid,
    pub username: String,
    pub bio: String,
    pub image_url: Option<String>,
}

impl From<ProfileRow> for ProfileDocument {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id.to_string(),
            uid: Some(row.uid.to_string()),
            username: Some(row.username),
            bio: Some(row.bio),
            image_uri: row.image_url,
        }
    }
}
