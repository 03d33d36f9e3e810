//! # Server-side access rules
//!
//! The checks every server function runs before touching the database. They are
//! plain functions over `store` types so they can be tested without Postgres.
//!
//! | Collection | Read | Write |
//! |------------|------|-------|
//! | notes | owner or a uid in `shared_with` | insert as yourself; update/delete by owner only |
//! | categories | owner | owner |
//! | user_profiles | any signed-in user | own profile only |
//! | blobs | public URL | `<prefix>/<own uid>/<name>` only |

use store::categories::is_hex_color;
use store::{NewCategory, NewNote, NoteFilter, NotePatch, UserProfile};
use thiserror::Error;

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Only the owner may change this {0}")]
    NotOwner(&'static str),

    #[error("Records must be created for the signed-in user")]
    OwnerMismatch,

    #[error("Queries are limited to the signed-in user")]
    ForeignQuery,

    #[error("A note cannot be shared with its owner")]
    SharedWithOwner,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least 8 characters")]
    WeakPassword,

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    BadCredentials,

    #[error("Invalid upload path: {0}")]
    InvalidBlobPath(String),
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Whether `user_id` may read a note.
pub fn can_read_note(owner_id: &str, shared_with: &[String], user_id: &str) -> bool {
    owner_id == user_id || shared_with.iter().any(|uid| uid == user_id)
}

pub fn check_owner(owner_id: &str, user_id: &str, entity: &'static str) -> Result<(), ApiError> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(ApiError::NotOwner(entity))
    }
}

pub fn check_new_note(user_id: &str, note: &NewNote) -> Result<(), ApiError> {
    if note.owner_id != user_id {
        return Err(ApiError::OwnerMismatch);
    }
    if note.shared_with.contains(user_id) {
        return Err(ApiError::SharedWithOwner);
    }
    if is_blank(&note.title) {
        return Err(ApiError::MissingField("title"));
    }
    if is_blank(&note.description) {
        return Err(ApiError::MissingField("description"));
    }
    if is_blank(&note.category_id) {
        return Err(ApiError::MissingField("category"));
    }
    Ok(())
}

/// Validate an update and drop the owner from `shared_with` if present.
pub fn sanitize_note_patch(owner_id: &str, mut patch: NotePatch) -> Result<NotePatch, ApiError> {
    if patch.title.as_deref().is_some_and(is_blank) {
        return Err(ApiError::MissingField("title"));
    }
    if patch.description.as_deref().is_some_and(is_blank) {
        return Err(ApiError::MissingField("description"));
    }
    if patch.category_id.as_deref().is_some_and(is_blank) {
        return Err(ApiError::MissingField("category"));
    }
    if let Some(shared_with) = patch.shared_with.as_mut() {
        shared_with.remove(owner_id);
    }
    Ok(patch)
}

/// Note queries may only ask about the caller.
pub fn check_note_filter(user_id: &str, filter: &NoteFilter) -> Result<(), ApiError> {
    if filter.user_id() == user_id {
        Ok(())
    } else {
        Err(ApiError::ForeignQuery)
    }
}

pub fn check_new_category(user_id: &str, category: &NewCategory) -> Result<(), ApiError> {
    if category.owner_id != user_id {
        return Err(ApiError::OwnerMismatch);
    }
    if is_blank(&category.name) {
        return Err(ApiError::MissingField("name"));
    }
    if !is_hex_color(&category.color) {
        return Err(ApiError::InvalidColor(category.color.clone()));
    }
    Ok(())
}

pub fn check_profile(user_id: &str, profile: &UserProfile) -> Result<(), ApiError> {
    if profile.uid != user_id {
        return Err(ApiError::OwnerMismatch);
    }
    if is_blank(&profile.username) {
        return Err(ApiError::MissingField("username"));
    }
    Ok(())
}

/// Uploads go to `<prefix>/<uid>/<name>` under the caller's own uid.
pub fn check_blob_path(user_id: &str, path: &str) -> Result<(), ApiError> {
    let segments: Vec<&str> = path.split('/').collect();
    let valid = segments.len() == 3
        && segments
            .iter()
            .all(|s| !s.is_empty() && *s != "." && *s != "..");
    if !valid || segments[1] != user_id {
        return Err(ApiError::InvalidBlobPath(path.to_string()));
    }
    Ok(())
}

/// Normalise and check registration input. Returns `(email, name)`.
pub fn check_registration(
    email: &str,
    password: &str,
    name: &str,
) -> Result<(String, String), ApiError> {
    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::InvalidEmail);
    }
    if password.len() < 8 {
        return Err(ApiError::WeakPassword);
    }
    if name.is_empty() {
        return Err(ApiError::MissingField("name"));
    }
    Ok((email, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn new_note(owner: &str, shared: &[&str]) -> NewNote {
        NewNote {
            title: "Shopping".into(),
            description: "Milk".into(),
            images: vec![],
            owner_id: owner.into(),
            owner_display_name: "Alice".into(),
            category_id: "cat1".into(),
            shared_with: shared.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_read_access() {
        let shared = vec!["u2".to_string()];
        assert!(can_read_note("u1", &shared, "u1"));
        assert!(can_read_note("u1", &shared, "u2"));
        assert!(!can_read_note("u1", &shared, "u3"));
    }

    #[test]
    fn test_owner_only_writes() {
        assert_eq!(check_owner("u1", "u1", "note"), Ok(()));
        assert_eq!(check_owner("u1", "u2", "note"), Err(ApiError::NotOwner("note")));
    }

    #[test]
    fn test_insert_rules() {
        assert_eq!(check_new_note("u1", &new_note("u1", &["u2"])), Ok(()));
        assert_eq!(
            check_new_note("u2", &new_note("u1", &[])),
            Err(ApiError::OwnerMismatch)
        );
        assert_eq!(
            check_new_note("u1", &new_note("u1", &["u1"])),
            Err(ApiError::SharedWithOwner)
        );

        let mut note = new_note("u1", &[]);
        note.category_id = " ".into();
        assert_eq!(check_new_note("u1", &note), Err(ApiError::MissingField("category")));
    }

    #[test]
    fn test_patch_strips_owner() {
        let patch = NotePatch {
            shared_with: Some(BTreeSet::from(["u1".to_string(), "u2".to_string()])),
            ..NotePatch::default()
        };
        let patch = sanitize_note_patch("u1", patch).unwrap();
        assert_eq!(patch.shared_with, Some(BTreeSet::from(["u2".to_string()])));

        let blank = NotePatch {
            title: Some(String::new()),
            ..NotePatch::default()
        };
        assert_eq!(
            sanitize_note_patch("u1", blank),
            Err(ApiError::MissingField("title"))
        );
    }

    #[test]
    fn test_queries_limited_to_caller() {
        assert_eq!(check_note_filter("u1", &NoteFilter::SharedWith("u1".into())), Ok(()));
        assert_eq!(
            check_note_filter("u1", &NoteFilter::OwnedBy("u2".into())),
            Err(ApiError::ForeignQuery)
        );
    }

    #[test]
    fn test_category_rules() {
        let category = NewCategory {
            name: "Work".into(),
            color: "#BBDEFB".into(),
            owner_id: "u1".into(),
        };
        assert_eq!(check_new_category("u1", &category), Ok(()));
        assert_eq!(check_new_category("u2", &category), Err(ApiError::OwnerMismatch));

        let bad = NewCategory {
            color: "blue".into(),
            ..category
        };
        assert_eq!(
            check_new_category("u1", &bad),
            Err(ApiError::InvalidColor("blue".into()))
        );
    }

    #[test]
    fn test_profile_rules() {
        let profile = UserProfile {
            uid: "u1".into(),
            username: "alice".into(),
            bio: String::new(),
            image_uri: None,
        };
        assert_eq!(check_profile("u1", &profile), Ok(()));
        assert_eq!(check_profile("u2", &profile), Err(ApiError::OwnerMismatch));
    }

    #[test]
    fn test_blob_paths() {
        assert_eq!(check_blob_path("u1", "profileImages/u1/20261018T120000000Z"), Ok(()));
        for bad in [
            "profileImages/u2/x",
            "profileImages/u1",
            "profileImages/u1/../x",
            "../u1/x",
            "a/u1/b/c",
        ] {
            assert!(check_blob_path("u1", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_registration() {
        assert_eq!(
            check_registration(" Alice@Example.com ", "password1", " Alice "),
            Ok(("alice@example.com".into(), "Alice".into()))
        );
        assert_eq!(
            check_registration("alice", "password1", "Alice"),
            Err(ApiError::InvalidEmail)
        );
        assert_eq!(
            check_registration("a@b.c", "short", "Alice"),
            Err(ApiError::WeakPassword)
        );
        assert_eq!(
            check_registration("a@b.c", "password1", " "),
            Err(ApiError::MissingField("name"))
        );
    }
}
