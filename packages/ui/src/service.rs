//! Service construction for the apps.
//!
//! The apps run [`store::NotesService`] over [`api::RemoteBackend`] with the
//! shared [`store::AuthSession`], configured from `notesapp.toml` in the
//! platform config directory.

use std::path::PathBuf;

use api::RemoteBackend;
use dioxus::prelude::*;
use store::{AuthSession, NotesAppConfig, NotesService};

use crate::auth::use_auth_session;

pub type AppService = NotesService<RemoteBackend, AuthSession>;

/// `<config dir>/notesapp/notesapp.toml`
pub fn config_path() -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    #[cfg(target_arch = "wasm32")]
    let base = PathBuf::from(".");
    base.join("notesapp").join(NotesAppConfig::filename())
}

/// Read the app config, falling back to the defaults on any error.
pub fn load_config() -> NotesAppConfig {
    let path = config_path();
    match NotesAppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            NotesAppConfig::default()
        }
    }
}

pub fn make_service(session: AuthSession) -> AppService {
    NotesService::new(RemoteBackend, session).with_config(load_config())
}

/// The service for this component, built once from the session in context.
pub fn use_service() -> AppService {
    let session = use_auth_session();
    use_hook(move || make_service(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_ends_with_filename() {
        assert!(config_path().ends_with("notesapp/notesapp.toml"));
    }

    #[test]
    fn test_service_reads_signed_out_session() {
        let service = make_service(AuthSession::signed_out());
        assert!(service.current_user().is_err());
    }
}
