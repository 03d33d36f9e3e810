pub mod backend;
pub mod categories;
pub mod config;
pub mod documents;
pub mod draft;
pub mod error;
pub mod file_store;
pub mod identity;
pub mod models;
pub mod service;
pub mod sharing;
pub mod view_model;
pub mod visibility;

mod memory;
pub use memory::{MemoryBackend, ScriptedPicker};

pub use backend::{
    Backend, BlobStorage, CategoryStore, IdentityProvider, ImagePicker, NoteStore, ProfileStore,
};
pub use config::NotesAppConfig;
pub use draft::NoteDraft;
pub use error::{BackendError, NotesError};
pub use file_store::FileBlobStorage;
pub use identity::AuthSession;
pub use models::{
    Category, CurrentUser, NewCategory, NewNote, Note, NoteFilter, NotePatch, PickedImages,
    ProfileDraft, ProfileImage, SharedUser, UserProfile,
};
pub use service::NotesService;
pub use sharing::ShareList;
pub use view_model::{LoadStatus, NoteCard, NoteEditorViewModel, NotesViewModel, NotesViewState};
pub use visibility::{can_delete, can_edit, list_visible_notes};
