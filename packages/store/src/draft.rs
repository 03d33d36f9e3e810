//! The note form.
//!
//! [`NoteDraft`] holds what the create/edit screens collect before a save: text
//! fields, the chosen category, image URIs and the [`ShareList`]. It checks the
//! required fields and produces the [`NewNote`] or [`NotePatch`] to persist.

use crate::error::NotesError;
use crate::models::{CurrentUser, NewNote, Note, NotePatch, PickedImages};
use crate::sharing::ShareList;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub description: String,
    pub category_id: Option<String>,
    pub images: Vec<String>,
    pub share: ShareList,
}

impl NoteDraft {
    /// An empty form for `owner_id`.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            share: ShareList::new(owner_id),
            ..Self::default()
        }
    }

    /// Seed the form from a stored note and its resolved share list.
    pub fn from_note(note: &Note, share: ShareList) -> Self {
        Self {
            title: note.title.clone(),
            description: note.description.clone(),
            category_id: note.category_id.clone(),
            images: note.images.clone(),
            share,
        }
    }

    /// Title, description and category are required.
    pub fn validate(&self) -> Result<(), NotesError> {
        if self.title.trim().is_empty() {
            return Err(NotesError::ValidationFailed("title"));
        }
        if self.description.trim().is_empty() {
            return Err(NotesError::ValidationFailed("description"));
        }
        if self.category_id.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(NotesError::ValidationFailed("category"));
        }
        Ok(())
    }

    /// Append picked images. A cancelled picker leaves the draft unchanged.
    pub fn attach(&mut self, picked: PickedImages) -> usize {
        match picked {
            PickedImages::Cancelled => 0,
            PickedImages::Selected(uris) => {
                let before = self.images.len();
                self.images.extend(uris.into_iter().filter(|u| !u.is_empty()));
                self.images.len() - before
            }
        }
    }

    pub fn add_image(&mut self, uri: impl Into<String>) {
        let uri = uri.into();
        if !uri.trim().is_empty() {
            self.images.push(uri);
        }
    }

    pub fn remove_image(&mut self, uri: &str) {
        self.images.retain(|i| i != uri);
    }

    /// The insert payload for a new note owned by `user`.
    pub fn to_new_note(&self, user: &CurrentUser) -> Result<NewNote, NotesError> {
        self.validate()?;
        Ok(NewNote {
            title: self.title.clone(),
            description: self.description.clone(),
            images: self.images.clone(),
            owner_id: user.uid.clone(),
            owner_display_name: user.owner_display_name().to_string(),
            category_id: self.category_id.clone().unwrap_or_default(),
            shared_with: self.share.uids().filter(|uid| *uid != user.uid).collect(),
        })
    }

    /// The full-form update for an existing note owned by `owner_id`.
    pub fn to_patch(&self, owner_id: &str) -> Result<NotePatch, NotesError> {
        self.validate()?;
        Ok(NotePatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            images: Some(self.images.clone()),
            category_id: self.category_id.clone(),
            shared_with: Some(self.share.uids().filter(|uid| uid != owner_id).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> NoteDraft {
        NoteDraft {
            title: "Shopping".into(),
            description: "Milk, eggs".into(),
            category_id: Some("cat1".into()),
            ..NoteDraft::new("u1")
        }
    }

    #[test]
    fn test_required_fields_in_order() {
        let mut draft = NoteDraft::new("u1");
        assert_eq!(draft.validate(), Err(NotesError::ValidationFailed("title")));
        draft.title = "Shopping".into();
        assert_eq!(draft.validate(), Err(NotesError::ValidationFailed("description")));
        draft.description = "Milk, eggs".into();
        assert_eq!(draft.validate(), Err(NotesError::ValidationFailed("category")));
        draft.category_id = Some(String::new());
        assert_eq!(draft.validate(), Err(NotesError::ValidationFailed("category")));
        draft.category_id = Some("cat1".into());
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_attach_and_remove_images() {
        let mut draft = filled();
        assert_eq!(draft.attach(PickedImages::Cancelled), 0);
        assert_eq!(
            draft.attach(PickedImages::Selected(vec!["file:///a.jpg".into(), "".into()])),
            1
        );
        draft.add_image("file:///b.jpg");
        draft.add_image(" ");
        assert_eq!(draft.images, vec!["file:///a.jpg", "file:///b.jpg"]);

        draft.remove_image("file:///a.jpg");
        assert_eq!(draft.images, vec!["file:///b.jpg"]);
    }

    #[test]
    fn test_new_note_payload() {
        let draft = filled();
        let user = CurrentUser::new("u1", None);
        let new_note = draft.to_new_note(&user).unwrap();
        assert_eq!(new_note.owner_id, "u1");
        assert_eq!(new_note.owner_display_name, "Unknown User");
        assert_eq!(new_note.category_id, "cat1");
        assert!(new_note.shared_with.is_empty());

        assert!(NoteDraft::new("u1").to_new_note(&user).is_err());
    }

    #[test]
    fn test_patch_replaces_form_fields() {
        let patch = filled().to_patch("u1").unwrap();
        assert_eq!(patch.title.as_deref(), Some("Shopping"));
        assert_eq!(patch.category_id.as_deref(), Some("cat1"));
        assert_eq!(patch.shared_with.map(|s| s.len()), Some(0));
    }
}
