use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::backend::{BlobStorage, CategoryStore, ImagePicker, NoteStore, ProfileStore};
use crate::documents::{CategoryDocument, NoteDocument, ProfileDocument};
use crate::error::BackendError;
use crate::models::{NewCategory, NewNote, NoteFilter, NotePatch, PickedImages, UserProfile};

/// In-memory backend for tests and offline demos.
///
/// Collections keep insertion order so queries return a stable "backend order".
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    notes: Arc<Mutex<Vec<NoteDocument>>>,
    categories: Arc<Mutex<Vec<CategoryDocument>>>,
    profiles: Arc<Mutex<Vec<ProfileDocument>>>,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<AtomicUsize>,
    outage: Arc<Mutex<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of backend calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with `message` until cleared with `None`.
    pub fn set_outage(&self, message: Option<&str>) {
        *self.outage.lock().unwrap() = message.map(str::to_string);
    }

    /// Store a raw note record as-is, bypassing insert.
    pub fn put_note_document(&self, doc: NoteDocument) {
        let mut notes = self.notes.lock().unwrap();
        notes.retain(|n| n.id != doc.id);
        notes.push(doc);
    }

    /// Store a raw profile record as-is, bypassing upsert.
    pub fn put_profile_document(&self, doc: ProfileDocument) {
        self.profiles.lock().unwrap().push(doc);
    }

    /// Store a raw category record as-is, bypassing insert.
    pub fn put_category_document(&self, doc: CategoryDocument) {
        self.categories.lock().unwrap().push(doc);
    }

    pub fn blob(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(path).cloned()
    }

    pub fn blob_paths(&self) -> Vec<String> {
        self.blobs.lock().unwrap().keys().cloned().collect()
    }

    fn begin(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outage.lock().unwrap().as_ref() {
            Some(message) => Err(BackendError::unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl NoteStore for MemoryBackend {
    async fn insert_note(&self, note: NewNote) -> Result<NoteDocument, BackendError> {
        self.begin()?;
        let doc = NoteDocument::from_new(generate_id(), note, Utc::now());
        self.notes.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn get_note(&self, id: &str) -> Result<Option<NoteDocument>, BackendError> {
        self.begin()?;
        Ok(self.notes.lock().unwrap().iter().find(|n| n.id == id).cloned())
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<(), BackendError> {
        self.begin()?;
        let mut notes = self.notes.lock().unwrap();
        let Some(doc) = notes.iter_mut().find(|n| n.id == id) else {
            return Err(BackendError::Rejected(format!("no note {id}")));
        };
        if let Some(title) = patch.title {
            doc.title = Some(title);
        }
        if let Some(description) = patch.description {
            doc.description = Some(description);
        }
        if let Some(images) = patch.images {
            doc.images = Some(images);
        }
        if let Some(category_id) = patch.category_id {
            doc.category_id = Some(category_id);
        }
        if let Some(shared_with) = patch.shared_with {
            doc.shared_with = Some(shared_with.into_iter().collect());
        }
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), BackendError> {
        self.begin()?;
        self.notes.lock().unwrap().retain(|n| n.id != id);
        Ok(())
    }

    async fn query_notes(&self, filter: NoteFilter) -> Result<Vec<NoteDocument>, BackendError> {
        self.begin()?;
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.matches(&filter))
            .cloned()
            .collect())
    }
}

impl CategoryStore for MemoryBackend {
    async fn insert_category(&self, category: NewCategory) -> Result<CategoryDocument, BackendError> {
        self.begin()?;
        let doc = CategoryDocument::from_new(generate_id(), category);
        self.categories.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn categories_owned_by(&self, owner_id: &str) -> Result<Vec<CategoryDocument>, BackendError> {
        self.begin()?;
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn delete_category(&self, id: &str) -> Result<(), BackendError> {
        self.begin()?;
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

impl ProfileStore for MemoryBackend {
    async fn profiles_by_username(&self, username: &str) -> Result<Vec<ProfileDocument>, BackendError> {
        self.begin()?;
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.username.as_deref() == Some(username))
            .cloned()
            .collect())
    }

    async fn profiles_by_uid(&self, uid: &str) -> Result<Vec<ProfileDocument>, BackendError> {
        self.begin()?;
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.uid.as_deref() == Some(uid))
            .cloned()
            .collect())
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<(), BackendError> {
        self.begin()?;
        let mut profiles = self.profiles.lock().unwrap();
        match profiles
            .iter_mut()
            .find(|p| p.uid.as_deref() == Some(profile.uid.as_str()))
        {
            Some(existing) => {
                let id = existing.id.clone();
                *existing = ProfileDocument::from_profile(id, profile);
            }
            None => profiles.push(ProfileDocument::from_profile(generate_id(), profile)),
        }
        Ok(())
    }
}

impl BlobStorage for MemoryBackend {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<String, BackendError> {
        self.begin()?;
        self.blobs.lock().unwrap().insert(path.to_string(), bytes);
        Ok(format!("memory://{path}"))
    }
}

/// An [`ImagePicker`] that replays a fixed outcome.
#[derive(Clone, Debug)]
pub struct ScriptedPicker {
    outcome: PickedImages,
}

impl ScriptedPicker {
    pub fn selecting(uris: &[&str]) -> Self {
        Self {
            outcome: PickedImages::Selected(uris.iter().map(|u| u.to_string()).collect()),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            outcome: PickedImages::Cancelled,
        }
    }
}

impl ImagePicker for ScriptedPicker {
    async fn pick_images(&self) -> Result<PickedImages, BackendError> {
        Ok(self.outcome.clone())
    }
}
