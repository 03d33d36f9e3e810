//! # Backend documents and boundary validation
//!
//! The hosted backend stores loosely-typed records. Each one is modelled here with
//! every field optional, using the backend's own key names (`userID`, `sharedWith`,
//! `imageURL`, ...), and converted into the domain types of [`crate::models`] via
//! `TryFrom`. A record missing a required key is rejected with
//! [`NotesError::InvalidDocument`]; missing collections decode as empty.
//!
//! | Document | Domain type | Required keys |
//! |----------|-------------|---------------|
//! | [`NoteDocument`] | [`Note`] | `title`, `description`, `userID` |
//! | [`CategoryDocument`] | [`Category`] | `name`, `color`, `userID` |
//! | [`ProfileDocument`] | [`UserProfile`] | `uid`, `username` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NotesError;
use crate::models::{
    Category, NewCategory, NewNote, Note, NoteFilter, UserProfile, UNKNOWN_OWNER_NAME,
};

/// A note record as the backend stores it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDocument {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "imageURL")]
    pub images: Option<Vec<String>>,
    #[serde(default, rename = "userID")]
    pub owner_id: Option<String>,
    #[serde(default, rename = "userName")]
    pub owner_display_name: Option<String>,
    #[serde(default, rename = "category")]
    pub category_id: Option<String>,
    #[serde(default, rename = "sharedWith")]
    pub shared_with: Option<Vec<String>>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NoteDocument {
    /// Build the stored record for a freshly inserted note.
    pub fn from_new(id: String, note: NewNote, created_at: DateTime<Utc>) -> Self {
        let shared_with = note
            .shared_with
            .into_iter()
            .filter(|uid| *uid != note.owner_id)
            .collect();
        Self {
            id,
            title: Some(note.title),
            description: Some(note.description),
            images: Some(note.images),
            owner_id: Some(note.owner_id),
            owner_display_name: Some(note.owner_display_name),
            category_id: Some(note.category_id),
            shared_with: Some(shared_with),
            created_at: Some(created_at),
        }
    }

    /// Evaluate a store query against the raw record.
    pub fn matches(&self, filter: &NoteFilter) -> bool {
        match filter {
            NoteFilter::OwnedBy(uid) => self.owner_id.as_deref() == Some(uid.as_str()),
            NoteFilter::SharedWith(uid) => self
                .shared_with
                .as_ref()
                .is_some_and(|shared| shared.iter().any(|s| s == uid)),
        }
    }
}

fn required(
    entity: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, NotesError> {
    value.ok_or_else(|| NotesError::InvalidDocument {
        entity,
        reason: format!("missing {field}"),
    })
}

impl TryFrom<NoteDocument> for Note {
    type Error = NotesError;

    fn try_from(doc: NoteDocument) -> Result<Self, Self::Error> {
        let title = required("note", "title", doc.title)?;
        let description = required("note", "description", doc.description)?;
        let owner_id = required("note", "userID", doc.owner_id)?;

        // Stale records may list the owner; the owner's access comes from ownership.
        let shared_with = doc
            .shared_with
            .unwrap_or_default()
            .into_iter()
            .filter(|uid| *uid != owner_id)
            .collect();

        Ok(Note {
            id: doc.id,
            title,
            description,
            images: doc.images.unwrap_or_default(),
            owner_display_name: doc
                .owner_display_name
                .unwrap_or_else(|| UNKNOWN_OWNER_NAME.to_string()),
            owner_id,
            category_id: doc.category_id.filter(|c| !c.is_empty()),
            shared_with,
            created_at: doc.created_at,
        })
    }
}

impl From<Note> for NoteDocument {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: Some(note.title),
            description: Some(note.description),
            images: Some(note.images),
            owner_id: Some(note.owner_id),
            owner_display_name: Some(note.owner_display_name),
            category_id: note.category_id,
            shared_with: Some(note.shared_with.into_iter().collect()),
            created_at: note.created_at,
        }
    }
}

/// A category record as the backend stores it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDocument {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "userID")]
    pub owner_id: Option<String>,
}

impl CategoryDocument {
    pub fn from_new(id: String, category: NewCategory) -> Self {
        Self {
            id,
            name: Some(category.name),
            color: Some(category.color),
            owner_id: Some(category.owner_id),
        }
    }
}

impl TryFrom<CategoryDocument> for Category {
    type Error = NotesError;

    fn try_from(doc: CategoryDocument) -> Result<Self, Self::Error> {
        Ok(Category {
            id: doc.id,
            name: required("category", "name", doc.name)?,
            color: required("category", "color", doc.color)?,
            owner_id: required("category", "userID", doc.owner_id)?,
        })
    }
}

/// A user profile record as the backend stores it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_uri: Option<String>,
}

impl ProfileDocument {
    pub fn from_profile(id: String, profile: UserProfile) -> Self {
        Self {
            id,
            uid: Some(profile.uid),
            username: Some(profile.username),
            bio: Some(profile.bio),
            image_uri: profile.image_uri,
        }
    }
}

impl TryFrom<ProfileDocument> for UserProfile {
    type Error = NotesError;

    fn try_from(doc: ProfileDocument) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            uid: required("profile", "uid", doc.uid)?,
            username: required("profile", "username", doc.username)?,
            bio: doc.bio.unwrap_or_default(),
            image_uri: doc.image_uri.filter(|uri| !uri.is_empty()),
        })
    }
}

/// Convert a batch of documents, dropping and logging the invalid ones.
pub fn validate_all<D, T>(entity: &'static str, docs: Vec<D>) -> Vec<T>
where
    T: TryFrom<D, Error = NotesError>,
{
    docs.into_iter()
        .filter_map(|doc| match T::try_from(doc) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping {} document: {}", entity, e);
                None
            }
        })
        .collect()
}
