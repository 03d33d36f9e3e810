//! # Screen state
//!
//! View models hold what a screen renders and expose explicit async actions.
//! Nothing here subscribes to anything: a screen calls
//! [`NotesViewModel::refresh`] when it appears or after a write, and the
//! editor reloads by calling [`NoteEditorViewModel::load`] again.
//!
//! Failures never poison a view model. They become a user-visible message (or a
//! [`LoadStatus::Failed`]) and the next action starts fresh.

use crate::backend::{Backend, IdentityProvider, ImagePicker};
use crate::categories::resolve_category;
use crate::draft::NoteDraft;
use crate::error::NotesError;
use crate::models::{Category, Note, PickedImages};
use crate::service::NotesService;
use crate::sharing::ShareList;
use crate::visibility::can_edit;

/// Where the note list is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Never refreshed.
    #[default]
    Idle,
    Loaded,
    /// Nobody is signed in. Distinct from a signed-in user with no notes.
    SignedOut,
    Failed(String),
}

/// One row of the note list.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteCard {
    pub note: Note,
    /// `None` when the note has no category or it is not one of the viewer's.
    pub category: Option<Category>,
    pub editable: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotesViewState {
    pub status: LoadStatus,
    pub cards: Vec<NoteCard>,
}

/// Pair each note with its category and the viewer's edit permission.
pub fn annotate(notes: Vec<Note>, categories: &[Category], user_id: &str) -> Vec<NoteCard> {
    notes
        .into_iter()
        .map(|note| NoteCard {
            category: resolve_category(note.category_id.as_deref(), categories).cloned(),
            editable: can_edit(&note, user_id),
            note,
        })
        .collect()
}

/// The note list screen.
pub struct NotesViewModel<B, I> {
    service: NotesService<B, I>,
    state: NotesViewState,
}

impl<B: Backend, I: IdentityProvider> NotesViewModel<B, I> {
    pub fn new(service: NotesService<B, I>) -> Self {
        Self {
            service,
            state: NotesViewState::default(),
        }
    }

    pub fn state(&self) -> &NotesViewState {
        &self.state
    }

    pub fn service(&self) -> &NotesService<B, I> {
        &self.service
    }

    /// Re-fetch notes and categories.
    ///
    /// On failure the previous cards stay on screen next to the error.
    pub async fn refresh(&mut self) -> &NotesViewState {
        let user = match self.service.current_user() {
            Ok(user) => user,
            Err(_) => {
                self.state = NotesViewState {
                    status: LoadStatus::SignedOut,
                    cards: Vec::new(),
                };
                return &self.state;
            }
        };

        let loaded = futures::try_join!(
            self.service.list_visible_notes(),
            self.service.list_categories(),
        );
        match loaded {
            Ok((notes, categories)) => {
                self.state = NotesViewState {
                    status: LoadStatus::Loaded,
                    cards: annotate(notes, &categories, &user.uid),
                };
            }
            Err(NotesError::Unauthenticated) => {
                self.state = NotesViewState {
                    status: LoadStatus::SignedOut,
                    cards: Vec::new(),
                };
            }
            Err(e) => {
                tracing::error!("Failed to load notes: {}", e);
                self.state.status = LoadStatus::Failed(e.to_string());
            }
        }
        &self.state
    }
}

/// The create/edit note screen.
pub struct NoteEditorViewModel<B, I> {
    service: NotesService<B, I>,
    note_id: Option<String>,
    draft: NoteDraft,
    categories: Vec<Category>,
    editable: bool,
    /// Id of the note this form deleted. A deleted form accepts no more edits.
    deleted: Option<String>,
    message: Option<String>,
}

impl<B: Backend, I: IdentityProvider> NoteEditorViewModel<B, I> {
    /// An empty form for a new note owned by the signed-in user.
    pub async fn new(service: NotesService<B, I>) -> Result<Self, NotesError> {
        let user = service.current_user()?;
        let categories = service.list_categories().await?;
        Ok(Self {
            service,
            note_id: None,
            draft: NoteDraft::new(user.uid),
            categories,
            editable: true,
            deleted: None,
            message: None,
        })
    }

    /// The form for an existing note. Non-owners get a read-only form.
    pub async fn load(service: NotesService<B, I>, note_id: &str) -> Result<Self, NotesError> {
        let user = service.current_user()?;
        let note = service.get_note(note_id).await?;
        let share = if note.shared_with.is_empty() {
            ShareList::new(note.owner_id.clone())
        } else {
            service.load_share_list(&note).await?
        };
        let categories = service.list_categories().await?;
        Ok(Self {
            editable: can_edit(&note, &user.uid),
            note_id: Some(note.id.clone()),
            draft: NoteDraft::from_note(&note, share),
            service,
            categories,
            deleted: None,
            message: None,
        })
    }

    pub fn note_id(&self) -> Option<&str> {
        self.note_id.as_deref()
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Mutable access for text inputs. Ignored on save when not editable.
    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<&Category> {
        resolve_category(self.draft.category_id.as_deref(), &self.categories)
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn fail(&mut self, error: NotesError) -> NotesError {
        tracing::warn!("Note form: {}", error);
        self.message = Some(error.to_string());
        error
    }

    fn check_editable(&mut self) -> Result<(), NotesError> {
        if let Some(id) = self.deleted.clone() {
            return Err(self.fail(NotesError::not_found("note", id)));
        }
        if self.editable {
            Ok(())
        } else {
            Err(self.fail(NotesError::PermissionDenied("note")))
        }
    }

    /// Resolve and add a username to the share list.
    pub async fn add_share(&mut self, username: &str) -> Result<(), NotesError> {
        self.check_editable()?;
        match self.service.share_with(&mut self.draft.share, username).await {
            Ok(user) => {
                self.message = Some(format!("Shared with {}", user.username));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    pub fn remove_share(&mut self, uid: &str) -> bool {
        if !self.editable || self.deleted.is_some() {
            return false;
        }
        self.draft.share.remove(uid)
    }

    /// Ask the picker for images and attach them. Returns how many were added.
    pub async fn pick_images<P: ImagePicker>(&mut self, picker: &P) -> Result<usize, NotesError> {
        self.check_editable()?;
        match picker.pick_images().await {
            Ok(PickedImages::Cancelled) => Ok(0),
            Ok(picked) => Ok(self.draft.attach(picked)),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Create or update the note. The form keeps its content on failure.
    pub async fn save(&mut self) -> Result<Note, NotesError> {
        self.check_editable()?;
        let saved = match &self.note_id {
            Some(id) => self.service.update_note(id, &self.draft).await,
            None => self.service.create_note(&self.draft).await,
        };
        match saved {
            Ok(note) => {
                self.note_id = Some(note.id.clone());
                self.message = Some("Note saved".to_string());
                Ok(note)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Delete the loaded note.
    pub async fn delete(&mut self) -> Result<(), NotesError> {
        self.check_editable()?;
        let Some(id) = self.note_id.clone() else {
            return Err(self.fail(NotesError::not_found("note", "")));
        };
        match self.service.delete_note(&id).await {
            Ok(()) => {
                self.note_id = None;
                self.deleted = Some(id);
                self.message = Some("Note deleted".to_string());
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{NoteDocument, ProfileDocument};
    use crate::identity::AuthSession;
    use crate::memory::{MemoryBackend, ScriptedPicker};
    use crate::models::CurrentUser;

    type Service = NotesService<MemoryBackend, AuthSession>;

    fn setup(uid: &str) -> (MemoryBackend, AuthSession, Service) {
        let backend = MemoryBackend::new();
        for (uid, username) in [("u1", "alice"), ("u2", "bob")] {
            backend.put_profile_document(ProfileDocument {
                id: format!("p-{uid}"),
                uid: Some(uid.to_string()),
                username: Some(username.to_string()),
                ..ProfileDocument::default()
            });
        }
        let session = AuthSession::signed_in(CurrentUser::new(uid, None));
        let service = NotesService::new(backend.clone(), session.clone());
        (backend, session, service)
    }

    fn note_doc(id: &str, owner: &str, shared: &[&str], category: &str) -> NoteDocument {
        NoteDocument {
            id: id.into(),
            title: Some(format!("Note {id}")),
            description: Some("body".into()),
            owner_id: Some(owner.into()),
            category_id: Some(category.into()),
            shared_with: Some(shared.iter().map(|s| s.to_string()).collect()),
            ..NoteDocument::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_signed_out_is_distinct_from_empty() {
        let (backend, session, service) = setup("u1");
        let mut vm = NotesViewModel::new(service);
        assert_eq!(vm.state().status, LoadStatus::Idle);

        assert_eq!(vm.refresh().await.status, LoadStatus::Loaded);
        assert!(vm.state().cards.is_empty());

        session.sign_out();
        let state = vm.refresh().await;
        assert_eq!(state.status, LoadStatus::SignedOut);
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_refresh_annotates_cards() {
        let (backend, _session, service) = setup("u2");
        let work = service.create_category("Work", None).await.unwrap();
        backend.put_note_document(note_doc("n1", "u2", &[], &work.id));
        backend.put_note_document(note_doc("n2", "u1", &["u2"], "alice-cat"));

        let mut vm = NotesViewModel::new(service);
        let state = vm.refresh().await;

        assert_eq!(state.cards.len(), 2);
        assert_eq!(state.cards[0].note.id, "n1");
        assert!(state.cards[0].editable);
        assert_eq!(state.cards[0].category.as_ref().map(|c| c.name.as_str()), Some("Work"));
        assert_eq!(state.cards[1].note.id, "n2");
        assert!(!state.cards[1].editable);
        assert!(state.cards[1].category.is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_cards() {
        let (backend, _session, service) = setup("u1");
        backend.put_note_document(note_doc("n1", "u1", &[], "c"));
        let mut vm = NotesViewModel::new(service);
        vm.refresh().await;

        backend.set_outage(Some("offline"));
        let state = vm.refresh().await;
        assert!(matches!(&state.status, LoadStatus::Failed(m) if m.contains("offline")));
        assert_eq!(state.cards.len(), 1);

        backend.set_outage(None);
        assert_eq!(vm.refresh().await.status, LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn test_editor_create_flow() {
        let (_backend, _session, service) = setup("u1");
        let category = service.create_category("Errands", None).await.unwrap();

        let mut editor = NoteEditorViewModel::new(service).await.unwrap();
        assert!(editor.editable());
        assert_eq!(editor.categories().len(), 1);

        assert_eq!(
            editor.save().await.unwrap_err(),
            NotesError::ValidationFailed("title")
        );
        assert!(editor.message().is_some());

        editor.draft_mut().title = "Shopping".into();
        editor.draft_mut().description = "Milk".into();
        editor.draft_mut().category_id = Some(category.id.clone());
        assert_eq!(editor.selected_category(), Some(&category));

        editor.add_share("bob").await.unwrap();
        assert_eq!(
            editor.add_share("bob").await.unwrap_err(),
            NotesError::AlreadyShared("bob".into())
        );
        assert_eq!(editor.pick_images(&ScriptedPicker::cancelling()).await.unwrap(), 0);
        assert_eq!(
            editor
                .pick_images(&ScriptedPicker::selecting(&["file:///a.jpg"]))
                .await
                .unwrap(),
            1
        );

        let note = editor.save().await.unwrap();
        assert_eq!(editor.note_id(), Some(note.id.as_str()));
        assert!(note.shared_with.contains("u2"));
        assert_eq!(note.images, vec!["file:///a.jpg"]);

        // A second save updates in place.
        editor.draft_mut().title = "Groceries".into();
        editor.save().await.unwrap();
        let service = editor.service.clone();
        assert_eq!(service.list_visible_notes().await.unwrap().len(), 1);
        assert_eq!(service.get_note(&note.id).await.unwrap().title, "Groceries");
    }

    #[tokio::test]
    async fn test_editor_load_for_recipient_is_read_only() {
        let (backend, _session, service) = setup("u2");
        backend.put_note_document(note_doc("n1", "u1", &["u2"], "c"));

        let mut editor = NoteEditorViewModel::load(service, "n1").await.unwrap();
        assert!(!editor.editable());
        let names: Vec<&str> = editor
            .draft()
            .share
            .users()
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(names, vec!["bob"]);

        assert_eq!(
            editor.save().await.unwrap_err(),
            NotesError::PermissionDenied("note")
        );
        assert_eq!(
            editor.delete().await.unwrap_err(),
            NotesError::PermissionDenied("note")
        );
        assert!(!editor.remove_share("u2"));
    }

    #[tokio::test]
    async fn test_editor_delete() {
        let (backend, _session, service) = setup("u1");
        backend.put_note_document(note_doc("n1", "u1", &[], "c"));

        let mut editor = NoteEditorViewModel::load(service.clone(), "n1").await.unwrap();
        editor.delete().await.unwrap();
        assert_eq!(editor.note_id(), None);
        assert_eq!(editor.message(), Some("Note deleted"));
        assert!(service.list_visible_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_editor_stays_closed_after_delete() {
        let (backend, _session, service) = setup("u1");
        backend.put_note_document(note_doc("n1", "u1", &[], "c"));

        let mut editor = NoteEditorViewModel::load(service.clone(), "n1").await.unwrap();
        editor.delete().await.unwrap();
        assert!(editor.is_deleted());
        let calls = backend.call_count();

        let not_found = NotesError::not_found("note", "n1");
        assert_eq!(editor.save().await.unwrap_err(), not_found);
        assert_eq!(editor.add_share("bob").await.unwrap_err(), not_found);
        assert_eq!(
            editor
                .pick_images(&ScriptedPicker::selecting(&["file:///a.jpg"]))
                .await
                .unwrap_err(),
            not_found
        );
        assert_eq!(editor.delete().await.unwrap_err(), not_found);
        assert!(!editor.remove_share("u2"));
        assert_eq!(backend.call_count(), calls);
        assert!(service.list_visible_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_editor_requires_sign_in() {
        let (_backend, session, service) = setup("u1");
        session.sign_out();
        assert!(matches!(
            NoteEditorViewModel::new(service).await,
            Err(NotesError::Unauthenticated)
        ));
    }
}
