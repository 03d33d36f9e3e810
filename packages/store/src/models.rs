//! # Domain models for notes, categories and profiles
//!
//! These are the validated types the rest of the crate works with. Raw backend
//! records live in [`crate::documents`] and are converted into these at the
//! boundary. Everything here is `Serialize + Deserialize` so it can cross the
//! server/client boundary via Dioxus server functions.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Note`] | A stored note. `owner_id` never changes after creation and `shared_with` never contains it. |
//! | [`NewNote`] | The insert payload; the backend assigns the id. |
//! | [`NotePatch`] | A partial update; `None` fields are left untouched. |
//! | [`Category`] | A per-user label with a display colour. Never shared. |
//! | [`UserProfile`] | One per identity, upserted by its owner. |
//! | [`SharedUser`] | The `{uid, username}` projection used by the sharing UI. |
//! | [`CurrentUser`] | What the identity collaborator reports for the signed-in user. |

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name stored on notes whose owner has none.
pub const UNKNOWN_OWNER_NAME: &str = "Unknown User";

/// A note visible to its owner and to every uid in `shared_with`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Image URIs in display order.
    pub images: Vec<String>,
    pub owner_id: String,
    pub owner_display_name: String,
    /// May reference a category that no longer exists.
    pub category_id: Option<String>,
    pub shared_with: BTreeSet<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Whether `user_id` may read this note.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.owner_id == user_id || self.shared_with.contains(user_id)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// Insert payload for a note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub owner_id: String,
    pub owner_display_name: String,
    pub category_id: String,
    pub shared_with: BTreeSet<String>,
}

/// Partial update for a note. The owner cannot be changed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub shared_with: Option<BTreeSet<String>>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.images.is_none()
            && self.category_id.is_none()
            && self.shared_with.is_none()
    }

    /// Apply the patch to a note in place.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(description) = &self.description {
            note.description = description.clone();
        }
        if let Some(images) = &self.images {
            note.images = images.clone();
        }
        if let Some(category_id) = &self.category_id {
            note.category_id = Some(category_id.clone());
        }
        if let Some(shared_with) = &self.shared_with {
            note.shared_with = shared_with.clone();
        }
    }
}

/// The two queries the note store must support.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteFilter {
    /// `owner_id == uid`
    OwnedBy(String),
    /// `shared_with` contains `uid`
    SharedWith(String),
}

impl NoteFilter {
    pub fn user_id(&self) -> &str {
        match self {
            NoteFilter::OwnedBy(uid) | NoteFilter::SharedWith(uid) => uid,
        }
    }
}

/// A user-defined category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    pub owner_id: String,
}

/// Insert payload for a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub owner_id: String,
}

/// A user's public profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub username: String,
    pub bio: String,
    pub image_uri: Option<String>,
}

/// A user a note is (or will be) shared with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedUser {
    pub uid: String,
    pub username: String,
}

impl From<&UserProfile> for SharedUser {
    fn from(profile: &UserProfile) -> Self {
        Self {
            uid: profile.uid.clone(),
            username: profile.username.clone(),
        }
    }
}

/// The signed-in user as reported by the identity collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub uid: String,
    pub display_name: Option<String>,
}

impl CurrentUser {
    pub fn new(uid: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name,
        }
    }

    /// Name recorded on notes this user creates.
    pub fn owner_display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNKNOWN_OWNER_NAME)
    }
}

/// Outcome of presenting the image picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickedImages {
    /// The user dismissed the picker. Not an error.
    Cancelled,
    /// Local URIs in the order the picker returned them.
    Selected(Vec<String>),
}

/// Profile image as held by the profile form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileImage {
    /// Already uploaded; stored as-is.
    Remote(String),
    /// Picked locally; uploaded to blob storage on save.
    Pending(Vec<u8>),
}

/// The profile form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub username: String,
    pub bio: String,
    pub image: Option<ProfileImage>,
}

impl ProfileDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone(),
            bio: profile.bio.clone(),
            image: profile.image_uri.clone().map(ProfileImage::Remote),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(owner: &str, shared: &[&str]) -> Note {
        Note {
            id: "n1".to_string(),
            title: "Shopping".to_string(),
            description: "Milk, eggs".to_string(),
            images: vec![],
            owner_id: owner.to_string(),
            owner_display_name: "Alice".to_string(),
            category_id: Some("cat1".to_string()),
            shared_with: shared.iter().map(|s| s.to_string()).collect(),
            created_at: None,
        }
    }

    #[test]
    fn test_visibility_rule() {
        let n = note("u1", &["u2"]);
        assert!(n.is_visible_to("u1"));
        assert!(n.is_visible_to("u2"));
        assert!(!n.is_visible_to("u3"));
        assert!(n.is_owned_by("u1"));
        assert!(!n.is_owned_by("u2"));
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut n = note("u1", &[]);
        let patch = NotePatch {
            title: Some("Groceries".to_string()),
            ..NotePatch::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut n);
        assert_eq!(n.title, "Groceries");
        assert_eq!(n.description, "Milk, eggs");
        assert_eq!(n.owner_id, "u1");
        assert!(NotePatch::default().is_empty());
    }

    #[test]
    fn test_filter_user_id() {
        assert_eq!(NoteFilter::OwnedBy("u1".into()).user_id(), "u1");
        assert_eq!(NoteFilter::SharedWith("u2".into()).user_id(), "u2");
    }

    #[test]
    fn test_owner_display_name_fallback() {
        assert_eq!(CurrentUser::new("u1", None).owner_display_name(), "Unknown User");
        assert_eq!(
            CurrentUser::new("u1", Some("  ".into())).owner_display_name(),
            "Unknown User"
        );
        assert_eq!(
            CurrentUser::new("u1", Some("Alice".into())).owner_display_name(),
            "Alice"
        );
    }
}
