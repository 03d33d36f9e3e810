//! # Notes service
//!
//! [`NotesService`] is the single entry point screens talk to. It is constructed
//! with an explicit backend and identity (no process-wide handles), so tests pass
//! in [`crate::MemoryBackend`] and [`crate::AuthSession`] while the apps pass the
//! server-function client.
//!
//! Every operation needs a signed-in user and fails with
//! [`NotesError::Unauthenticated`] otherwise. Writes to notes and categories
//! re-check ownership before calling the backend; the backend enforces the same
//! rules independently.
//!
//! | Area | Operations |
//! |------|-----------|
//! | Notes | [`list_visible_notes`](NotesService::list_visible_notes), [`get_note`](NotesService::get_note), [`create_note`](NotesService::create_note), [`update_note`](NotesService::update_note), [`delete_note`](NotesService::delete_note), [`upload_note_image`](NotesService::upload_note_image) |
//! | Categories | [`list_categories`](NotesService::list_categories), [`create_category`](NotesService::create_category), [`delete_category`](NotesService::delete_category) |
//! | Sharing | [`resolve_user`](NotesService::resolve_user), [`share_with`](NotesService::share_with), [`load_share_list`](NotesService::load_share_list) |
//! | Profile | [`get_profile`](NotesService::get_profile), [`save_profile`](NotesService::save_profile) |

use chrono::Utc;

use crate::backend::{Backend, IdentityProvider};
use crate::categories::new_category;
use crate::config::NotesAppConfig;
use crate::documents::validate_all;
use crate::draft::NoteDraft;
use crate::error::NotesError;
use crate::models::{
    Category, CurrentUser, Note, ProfileDraft, ProfileImage, SharedUser, UserProfile,
};
use crate::sharing::{resolve_user_by_username, ShareList};
use crate::visibility::{can_delete, can_edit, list_visible_notes_for};

/// Note, category, sharing and profile operations for the signed-in user.
#[derive(Clone, Debug)]
pub struct NotesService<B, I> {
    backend: B,
    identity: I,
    config: NotesAppConfig,
}

impl<B: Backend, I: IdentityProvider> NotesService<B, I> {
    pub fn new(backend: B, identity: I) -> Self {
        Self {
            backend,
            identity,
            config: NotesAppConfig::default(),
        }
    }

    pub fn with_config(mut self, config: NotesAppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn config(&self) -> &NotesAppConfig {
        &self.config
    }

    /// The signed-in user, or [`NotesError::Unauthenticated`].
    pub fn current_user(&self) -> Result<CurrentUser, NotesError> {
        self.identity
            .current_user()
            .ok_or(NotesError::Unauthenticated)
    }

    pub async fn list_visible_notes(&self) -> Result<Vec<Note>, NotesError> {
        let user = self.current_user()?;
        list_visible_notes_for(&user.uid, &self.backend).await
    }

    /// A single note the user may see. Invisible notes report as not found.
    pub async fn get_note(&self, id: &str) -> Result<Note, NotesError> {
        let user = self.current_user()?;
        let doc = self
            .backend
            .get_note(id)
            .await?
            .ok_or_else(|| NotesError::not_found("note", id))?;
        let note = Note::try_from(doc)?;
        if !note.is_visible_to(&user.uid) {
            return Err(NotesError::not_found("note", id));
        }
        Ok(note)
    }

    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, NotesError> {
        let user = self.current_user()?;
        let new_note = draft.to_new_note(&user)?;
        let doc = self.backend.insert_note(new_note).await?;
        tracing::info!("Created note {} for {}", doc.id, user.uid);
        Note::try_from(doc)
    }

    /// Save the whole form over an existing note. Owner only.
    pub async fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<Note, NotesError> {
        let user = self.current_user()?;
        let mut note = self.get_note(id).await?;
        if !can_edit(&note, &user.uid) {
            return Err(NotesError::PermissionDenied("note"));
        }
        let patch = draft.to_patch(&note.owner_id)?;
        self.backend.update_note(id, patch.clone()).await?;
        patch.apply_to(&mut note);
        tracing::info!("Updated note {}", id);
        Ok(note)
    }

    /// Delete a note. Owner only.
    pub async fn delete_note(&self, id: &str) -> Result<(), NotesError> {
        let user = self.current_user()?;
        let note = self.get_note(id).await?;
        if !can_delete(&note, &user.uid) {
            return Err(NotesError::PermissionDenied("note"));
        }
        self.backend.delete_note(id).await?;
        tracing::info!("Deleted note {}", id);
        Ok(())
    }

    /// Upload an image for a note and return its URL.
    pub async fn upload_note_image(&self, bytes: Vec<u8>) -> Result<String, NotesError> {
        let user = self.current_user()?;
        let path = blob_path(&self.config.storage.note_images_prefix, &user.uid);
        Ok(self.backend.upload(&path, bytes).await?)
    }

    /// The signed-in user's categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, NotesError> {
        let user = self.current_user()?;
        let docs = self.backend.categories_owned_by(&user.uid).await?;
        let categories: Vec<Category> = validate_all("category", docs);
        Ok(categories
            .into_iter()
            .filter(|c| c.owner_id == user.uid)
            .collect())
    }

    /// Create a category; `color` defaults to the first palette colour.
    pub async fn create_category(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Category, NotesError> {
        let user = self.current_user()?;
        let new = new_category(
            &user.uid,
            name,
            color,
            self.config.categories.default_color(),
        )?;
        let doc = self.backend.insert_category(new).await?;
        tracing::info!("Created category {} for {}", doc.id, user.uid);
        Category::try_from(doc)
    }

    /// Delete one of the user's categories. Notes referencing it are left alone.
    pub async fn delete_category(&self, id: &str) -> Result<(), NotesError> {
        let categories = self.list_categories().await?;
        if !categories.iter().any(|c| c.id == id) {
            return Err(NotesError::not_found("category", id));
        }
        self.backend.delete_category(id).await?;
        tracing::info!("Deleted category {}", id);
        Ok(())
    }

    pub async fn resolve_user(&self, username: &str) -> Result<SharedUser, NotesError> {
        self.current_user()?;
        resolve_user_by_username(
            &self.backend,
            username,
            self.config.sharing.require_unique_username,
        )
        .await
    }

    /// Add `username` to a form's share list.
    pub async fn share_with(
        &self,
        share: &mut ShareList,
        username: &str,
    ) -> Result<SharedUser, NotesError> {
        self.current_user()?;
        share
            .add(
                &self.backend,
                username,
                self.config.sharing.require_unique_username,
            )
            .await
            .cloned()
    }

    /// Resolve a stored note's `shared_with` back to usernames.
    pub async fn load_share_list(&self, note: &Note) -> Result<ShareList, NotesError> {
        self.current_user()?;
        ShareList::load(&self.backend, &note.owner_id, note.shared_with.iter().cloned()).await
    }

    pub async fn get_profile(&self) -> Result<Option<UserProfile>, NotesError> {
        let user = self.current_user()?;
        let docs = self.backend.profiles_by_uid(&user.uid).await?;
        let profiles: Vec<UserProfile> = validate_all("profile", docs);
        Ok(profiles.into_iter().next())
    }

    /// Create or overwrite the user's profile, uploading a pending image first.
    pub async fn save_profile(&self, draft: ProfileDraft) -> Result<UserProfile, NotesError> {
        let user = self.current_user()?;
        let username = draft.username.trim();
        if username.is_empty() {
            return Err(NotesError::ValidationFailed("username"));
        }

        let image_uri = match draft.image {
            None => None,
            Some(ProfileImage::Remote(url)) => Some(url),
            Some(ProfileImage::Pending(bytes)) => {
                let path = blob_path(&self.config.storage.profile_images_prefix, &user.uid);
                Some(self.backend.upload(&path, bytes).await?)
            }
        };

        let profile = UserProfile {
            uid: user.uid.clone(),
            username: username.to_string(),
            bio: draft.bio,
            image_uri,
        };
        self.backend.upsert_profile(profile.clone()).await?;
        tracing::info!("Saved profile for {}", user.uid);
        Ok(profile)
    }
}

/// `<prefix>/<uid>/<timestamp>`
fn blob_path(prefix: &str, uid: &str) -> String {
    format!("{prefix}/{uid}/{}", Utc::now().format("%Y%m%dT%H%M%S%3fZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::resolve_category;
    use crate::documents::{NoteDocument, ProfileDocument};
    use crate::identity::AuthSession;
    use crate::memory::MemoryBackend;

    fn setup() -> (MemoryBackend, AuthSession, NotesService<MemoryBackend, AuthSession>) {
        let backend = MemoryBackend::new();
        for (uid, username) in [("u1", "alice"), ("u2", "bob")] {
            backend.put_profile_document(ProfileDocument {
                id: format!("p-{uid}"),
                uid: Some(uid.to_string()),
                username: Some(username.to_string()),
                ..ProfileDocument::default()
            });
        }
        let session = AuthSession::signed_in(CurrentUser::new("u1", Some("Alice".into())));
        let service = NotesService::new(backend.clone(), session.clone());
        (backend, session, service)
    }

    fn shopping_draft() -> NoteDraft {
        NoteDraft {
            title: "Shopping".into(),
            description: "Milk, eggs".into(),
            category_id: Some("cat1".into()),
            ..NoteDraft::new("u1")
        }
    }

    #[tokio::test]
    async fn test_share_scenario() {
        let (backend, session, service) = setup();

        let note = service.create_note(&shopping_draft()).await.unwrap();
        assert_eq!(note.owner_display_name, "Alice");
        assert_eq!(service.list_visible_notes().await.unwrap().len(), 1);

        // Share with bob
        let mut draft = NoteDraft::from_note(&note, service.load_share_list(&note).await.unwrap());
        service.share_with(&mut draft.share, "bob").await.unwrap();
        let note = service.update_note(&note.id, &draft).await.unwrap();
        assert!(note.shared_with.contains("u2"));

        // Bob sees the same note, read-only
        session.sign_in(CurrentUser::new("u2", Some("Bob".into())));
        let bob_service = NotesService::new(backend, session);
        let visible = bob_service.list_visible_notes().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, note.id);
        assert!(!can_edit(&visible[0], "u2"));
        assert!(can_edit(&visible[0], "u1"));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_write() {
        let (backend, session, service) = setup();
        let mut draft = shopping_draft();
        service.share_with(&mut draft.share, "bob").await.unwrap();
        let note = service.create_note(&draft).await.unwrap();

        session.sign_in(CurrentUser::new("u2", None));
        let calls = backend.call_count();

        let mut edit = NoteDraft::from_note(&note, ShareList::new("u1"));
        edit.title = "Hijacked".into();
        assert_eq!(
            service.update_note(&note.id, &edit).await.unwrap_err(),
            NotesError::PermissionDenied("note")
        );
        assert_eq!(
            service.delete_note(&note.id).await.unwrap_err(),
            NotesError::PermissionDenied("note")
        );
        // Only the two point reads reached the backend.
        assert_eq!(backend.call_count(), calls + 2);
    }

    #[tokio::test]
    async fn test_invisible_note_is_not_found() {
        let (_backend, session, service) = setup();
        let note = service.create_note(&shopping_draft()).await.unwrap();

        session.sign_in(CurrentUser::new("u3", None));
        assert!(matches!(
            service.get_note(&note.id).await.unwrap_err(),
            NotesError::NotFound { entity: "note", .. }
        ));
    }

    #[tokio::test]
    async fn test_invalid_note_is_skipped_but_rejected_on_read() {
        let (backend, _session, service) = setup();
        let valid = service.create_note(&shopping_draft()).await.unwrap();
        backend.put_note_document(NoteDocument {
            id: "broken".into(),
            description: Some("no title".into()),
            owner_id: Some("u1".into()),
            category_id: Some("cat1".into()),
            ..NoteDocument::default()
        });

        let listed = service.list_visible_notes().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, valid.id);

        assert!(matches!(
            service.get_note("broken").await.unwrap_err(),
            NotesError::InvalidDocument { entity: "note", reason } if reason.contains("title")
        ));
    }

    #[tokio::test]
    async fn test_delete_note() {
        let (_backend, _session, service) = setup();
        let note = service.create_note(&shopping_draft()).await.unwrap();

        service.delete_note(&note.id).await.unwrap();
        assert!(service.list_visible_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_category_delete_does_not_cascade() {
        let (_backend, _session, service) = setup();
        let category = service.create_category("Errands", None).await.unwrap();
        assert_eq!(category.color, "#FFCDD2");

        let mut draft = shopping_draft();
        draft.category_id = Some(category.id.clone());
        let note = service.create_note(&draft).await.unwrap();

        service.delete_category(&category.id).await.unwrap();

        let notes = service.list_visible_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], note);
        let categories = service.list_categories().await.unwrap();
        assert!(resolve_category(notes[0].category_id.as_deref(), &categories).is_none());
    }

    #[tokio::test]
    async fn test_categories_are_per_user() {
        let (backend, session, service) = setup();
        let category = service.create_category("Work", Some("#BBDEFB")).await.unwrap();

        session.sign_in(CurrentUser::new("u2", None));
        let bob_service = NotesService::new(backend, session);
        assert!(bob_service.list_categories().await.unwrap().is_empty());
        assert!(matches!(
            bob_service.delete_category(&category.id).await.unwrap_err(),
            NotesError::NotFound { entity: "category", .. }
        ));
    }

    #[tokio::test]
    async fn test_unauthenticated_operations() {
        let (backend, session, service) = setup();
        session.sign_out();

        assert_eq!(
            service.list_visible_notes().await.unwrap_err(),
            NotesError::Unauthenticated
        );
        assert_eq!(
            service.create_note(&shopping_draft()).await.unwrap_err(),
            NotesError::Unauthenticated
        );
        assert_eq!(service.get_profile().await.unwrap_err(), NotesError::Unauthenticated);
        assert_eq!(
            service.resolve_user("bob").await.unwrap_err(),
            NotesError::Unauthenticated
        );
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_validation_happens_before_backend() {
        let (backend, _session, service) = setup();
        let mut draft = shopping_draft();
        draft.category_id = None;

        assert_eq!(
            service.create_note(&draft).await.unwrap_err(),
            NotesError::ValidationFailed("category")
        );
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_unknown_user() {
        let (_backend, _session, service) = setup();
        assert!(matches!(
            service.resolve_user("carol").await.unwrap_err(),
            NotesError::NotFound { entity: "user", .. }
        ));
    }

    #[tokio::test]
    async fn test_save_profile_uploads_pending_image() {
        let (backend, _session, service) = setup();

        let profile = service
            .save_profile(ProfileDraft {
                username: " alice ".into(),
                bio: "Hi".into(),
                image: Some(ProfileImage::Pending(vec![0xFF, 0xD8])),
            })
            .await
            .unwrap();

        assert_eq!(profile.username, "alice");
        let url = profile.image_uri.clone().unwrap();
        assert!(url.starts_with("memory://profileImages/u1/"));
        let paths = backend.blob_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(backend.blob(&paths[0]), Some(vec![0xFF, 0xD8]));

        assert_eq!(service.get_profile().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_save_profile_keeps_remote_image() {
        let (backend, _session, service) = setup();
        let profile = service
            .save_profile(ProfileDraft {
                username: "alice".into(),
                bio: String::new(),
                image: Some(ProfileImage::Remote("https://cdn/a.png".into())),
            })
            .await
            .unwrap();
        assert_eq!(profile.image_uri.as_deref(), Some("https://cdn/a.png"));
        assert!(backend.blob_paths().is_empty());

        assert_eq!(
            service.save_profile(ProfileDraft::default()).await.unwrap_err(),
            NotesError::ValidationFailed("username")
        );
    }

    #[tokio::test]
    async fn test_upload_note_image_path() {
        let (_backend, _session, service) = setup();
        let url = service.upload_note_image(vec![1]).await.unwrap();
        assert!(url.starts_with("memory://noteImages/u1/"));
    }
}
