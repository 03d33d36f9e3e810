//! # Note visibility and edit permission
//!
//! A user sees the notes they own plus the notes shared with them.
//! [`list_visible_notes`] runs the two store queries concurrently and hands the
//! results to [`merge_visible`], which keeps owned notes first and lets the owned
//! copy win whenever a note id shows up in both sets.
//!
//! [`can_edit`] / [`can_delete`] are the client-side permission checks. They drive
//! the UI; the server applies the same rule on its own.

use std::collections::HashSet;

use crate::backend::{IdentityProvider, NoteStore};
use crate::documents::validate_all;
use crate::error::NotesError;
use crate::models::{Note, NoteFilter};

/// All notes the signed-in user may see, owned notes first, no duplicates.
///
/// Fails with [`NotesError::Unauthenticated`] when nobody is signed in.
pub async fn list_visible_notes<I, S>(identity: &I, store: &S) -> Result<Vec<Note>, NotesError>
where
    I: IdentityProvider,
    S: NoteStore,
{
    let user = identity.current_user().ok_or(NotesError::Unauthenticated)?;
    list_visible_notes_for(&user.uid, store).await
}

/// [`list_visible_notes`] for an explicit user id.
pub async fn list_visible_notes_for<S>(user_id: &str, store: &S) -> Result<Vec<Note>, NotesError>
where
    S: NoteStore,
{
    let (owned, shared) = futures::try_join!(
        store.query_notes(NoteFilter::OwnedBy(user_id.to_string())),
        store.query_notes(NoteFilter::SharedWith(user_id.to_string())),
    )?;

    let owned: Vec<Note> = validate_all("note", owned);
    let shared: Vec<Note> = validate_all("note", shared);
    tracing::debug!(
        "{} owns {} notes, {} shared with them",
        user_id,
        owned.len(),
        shared.len()
    );

    Ok(merge_visible(owned, shared))
}

/// Union two query results by note id. Owned copies take precedence.
pub fn merge_visible(owned: Vec<Note>, shared: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(owned.len() + shared.len());
    for note in owned.into_iter().chain(shared) {
        if seen.insert(note.id.clone()) {
            merged.push(note);
        }
    }
    merged
}

/// Only the owner may edit a note.
pub fn can_edit(note: &Note, user_id: &str) -> bool {
    note.is_owned_by(user_id)
}

/// Only the owner may delete a note.
pub fn can_delete(note: &Note, user_id: &str) -> bool {
    can_edit(note, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::NoteDocument;
    use crate::identity::AuthSession;
    use crate::memory::MemoryBackend;
    use crate::models::CurrentUser;

    fn doc(id: &str, owner: &str, shared: &[&str]) -> NoteDocument {
        NoteDocument {
            id: id.to_string(),
            title: Some(format!("title {id}")),
            description: Some("body".to_string()),
            owner_id: Some(owner.to_string()),
            shared_with: Some(shared.iter().map(|s| s.to_string()).collect()),
            ..NoteDocument::default()
        }
    }

    fn note(id: &str, owner: &str, title: &str) -> Note {
        let mut n = Note::try_from(doc(id, owner, &[])).unwrap();
        n.title = title.to_string();
        n
    }

    #[tokio::test]
    async fn test_owned_and_shared_are_unioned() {
        let backend = MemoryBackend::new();
        backend.put_note_document(doc("a", "u1", &[]));
        backend.put_note_document(doc("b", "u2", &["u1"]));
        backend.put_note_document(doc("c", "u3", &["u2"]));

        let session = AuthSession::signed_in(CurrentUser::new("u1", None));
        let notes = list_visible_notes(&session, &backend).await.unwrap();

        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_stale_self_share_appears_once() {
        let backend = MemoryBackend::new();
        // Owner listed in its own shared_with: both queries return it.
        backend.put_note_document(doc("a", "u1", &["u1", "u2"]));

        let notes = list_visible_notes_for("u1", &backend).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "a");
    }

    #[tokio::test]
    async fn test_signed_out_is_an_error_not_empty() {
        let backend = MemoryBackend::new();
        let session = AuthSession::signed_out();

        let err = list_visible_notes(&session, &backend).await.unwrap_err();
        assert_eq!(err, NotesError::Unauthenticated);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_documents_are_skipped() {
        let backend = MemoryBackend::new();
        backend.put_note_document(doc("a", "u1", &[]));
        backend.put_note_document(NoteDocument {
            id: "broken".to_string(),
            owner_id: Some("u1".to_string()),
            ..NoteDocument::default()
        });

        let notes = list_visible_notes_for("u1", &backend).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "a");
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = MemoryBackend::new();
        backend.set_outage(Some("offline"));

        let err = list_visible_notes_for("u1", &backend).await.unwrap_err();
        assert!(err.is_backend());
    }

    #[test]
    fn test_merge_prefers_owned_copy() {
        let owned = vec![note("a", "u1", "owned copy")];
        let shared = vec![note("a", "u1", "shared copy"), note("b", "u2", "other")];

        let merged = merge_visible(owned, shared);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "owned copy");
        assert_eq!(merged[1].id, "b");
    }

    #[test]
    fn test_only_owner_can_edit_or_delete() {
        let mut n = note("a", "u1", "t");
        n.shared_with.insert("u2".to_string());

        assert!(can_edit(&n, "u1"));
        assert!(can_delete(&n, "u1"));
        assert!(!can_edit(&n, "u2"));
        assert!(!can_delete(&n, "u2"));
        assert!(!can_edit(&n, "u3"));
    }
}
