//! # Client backend over server functions
//!
//! [`RemoteBackend`] implements the `store` collaborator traits by calling the
//! server functions in this crate, so the apps run the same `NotesService` and
//! view models the tests run against `store::MemoryBackend`. Any server function
//! failure, whether transport or a refused rule, surfaces as
//! [`BackendError::Unavailable`] carrying the server's message.

use dioxus::prelude::ServerFnError;
use store::documents::{CategoryDocument, NoteDocument, ProfileDocument};
use store::{
    BackendError, BlobStorage, CategoryStore, NewCategory, NewNote, NoteFilter, NotePatch,
    NoteStore, ProfileStore, UserProfile,
};

/// `store` backend that talks to the fullstack server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemoteBackend;

fn backend_error(e: ServerFnError) -> BackendError {
    BackendError::unavailable(e.to_string())
}

impl NoteStore for RemoteBackend {
    async fn insert_note(&self, note: NewNote) -> Result<NoteDocument, BackendError> {
        crate::notes::insert_note(note).await.map_err(backend_error)
    }

    async fn get_note(&self, id: &str) -> Result<Option<NoteDocument>, BackendError> {
        crate::notes::get_note(id.to_string())
            .await
            .map_err(backend_error)
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<(), BackendError> {
        crate::notes::update_note(id.to_string(), patch)
            .await
            .map_err(backend_error)
    }

    async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        crate::notes::delete_note(id.to_string())
            .await
            .map_err(backend_error)
    }

    async fn query_notes(&self, filter: NoteFilter) -> Result<Vec<NoteDocument>, BackendError> {
        crate::notes::query_notes(filter).await.map_err(backend_error)
    }
}

impl CategoryStore for RemoteBackend {
    async fn insert_category(&self, category: NewCategory) -> Result<CategoryDocument, BackendError> {
        crate::categories::insert_category(category)
            .await
            .map_err(backend_error)
    }

    async fn categories_owned_by(&self, owner_id: &str) -> Result<Vec<CategoryDocument>, BackendError> {
        crate::categories::categories_owned_by(owner_id.to_string())
            .await
            .map_err(backend_error)
    }

    async fn delete_category(&self, id: &str) -> Result<(), BackendError> {
        crate::categories::delete_category(id.to_string())
            .await
            .map_err(backend_error)
    }
}

impl ProfileStore for RemoteBackend {
    async fn profiles_by_username(&self, username: &str) -> Result<Vec<ProfileDocument>, BackendError> {
        crate::profiles::profiles_by_username(username.to_string())
            .await
            .map_err(backend_error)
    }

    async fn profiles_by_uid(&self, uid: &str) -> Result<Vec<ProfileDocument>, BackendError> {
        crate::profiles::profiles_by_uid(uid.to_string())
            .await
            .map_err(backend_error)
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<(), BackendError> {
        crate::profiles::upsert_profile(profile)
            .await
            .map_err(backend_error)
    }
}

impl BlobStorage for RemoteBackend {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, BackendError> {
        crate::blobs::upload_blob(path.to_string(), bytes)
            .await
            .map_err(backend_error)
    }
}
