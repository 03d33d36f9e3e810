//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{
    set_signed_in, use_auth, use_auth_session, AuthProvider, AuthState, LoginForm, LogoutButton,
    RegisterForm,
};

mod service;
pub use service::{config_path, load_config, make_service, use_service, AppService};

mod navbar;
pub use navbar::Navbar;

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityBanner, ActivityLogPanel, ActivityLogToggle};

mod note_list;
pub use note_list::{NoteCardView, NoteList};

mod note_form;
pub use note_form::NoteForm;

mod share_editor;
pub use share_editor::ShareEditor;

mod picker;
pub use picker::UrlPicker;

mod categories;
pub use categories::CategoryManager;

mod profile_form;
pub use profile_form::ProfileForm;
