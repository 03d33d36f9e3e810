//! # Backend collaborator traits
//!
//! Every persistence, auth and storage call goes through one of these traits, so
//! the same resolvers and view models run against the in-memory fakes
//! ([`crate::MemoryBackend`]), the Postgres backend on the server, or the
//! server-function client on web/mobile.
//!
//! | Trait | Operations |
//! |-------|-----------|
//! | [`IdentityProvider`] | Current user, if any. |
//! | [`NoteStore`] | Insert with generated id, point read, partial update, delete, and the two [`NoteFilter`] queries. |
//! | [`CategoryStore`] | Insert, query by owner, delete. |
//! | [`ProfileStore`] | Query by username, query by uid, upsert by owner. |
//! | [`BlobStorage`] | Upload bytes under a path, get back a download URL. |
//! | [`ImagePicker`] | Present a chooser; cancellation is a normal outcome. |
//!
//! Stores hand back raw documents; validation happens in [`crate::documents`].
//! [`Backend`] bundles the four storage traits for the service layer.

use std::future::Future;

use crate::documents::{CategoryDocument, NoteDocument, ProfileDocument};
use crate::error::BackendError;
use crate::models::{
    CurrentUser, NewCategory, NewNote, NoteFilter, NotePatch, PickedImages, UserProfile,
};

/// Reports the signed-in user.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<CurrentUser>;
}

/// Async access to the note collection.
pub trait NoteStore {
    fn insert_note(
        &self,
        note: NewNote,
    ) -> impl Future<Output = Result<NoteDocument, BackendError>>;
    fn get_note(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<NoteDocument>, BackendError>>;
    fn update_note(
        &self,
        id: &str,
        patch: NotePatch,
    ) -> impl Future<Output = Result<(), BackendError>>;
    fn delete_note(&self, id: &str) -> impl Future<Output = Result<(), BackendError>>;
    fn query_notes(
        &self,
        filter: NoteFilter,
    ) -> impl Future<Output = Result<Vec<NoteDocument>, BackendError>>;
}

/// Async access to the category collection.
pub trait CategoryStore {
    fn insert_category(
        &self,
        category: NewCategory,
    ) -> impl Future<Output = Result<CategoryDocument, BackendError>>;
    fn categories_owned_by(
        &self,
        owner_id: &str,
    ) -> impl Future<Output = Result<Vec<CategoryDocument>, BackendError>>;
    fn delete_category(&self, id: &str) -> impl Future<Output = Result<(), BackendError>>;
}

/// Async access to user profiles.
pub trait ProfileStore {
    fn profiles_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<ProfileDocument>, BackendError>>;
    fn profiles_by_uid(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Vec<ProfileDocument>, BackendError>>;
    /// Create the profile for `profile.uid` if absent, otherwise overwrite it.
    fn upsert_profile(
        &self,
        profile: UserProfile,
    ) -> impl Future<Output = Result<(), BackendError>>;
}

/// Binary uploads.
pub trait BlobStorage {
    /// Store `bytes` at `path` and return a URL the client can load.
    fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<String, BackendError>>;
}

/// Native photo chooser.
pub trait ImagePicker {
    fn pick_images(&self) -> impl Future<Output = Result<PickedImages, BackendError>>;
}

/// Everything the notes service persists through.
pub trait Backend: NoteStore + CategoryStore + ProfileStore + BlobStorage {}

impl<T> Backend for T where T: NoteStore + CategoryStore + ProfileStore + BlobStorage {}
