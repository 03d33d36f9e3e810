//! Blob upload. Files land in the configured directory, which the server
//! also serves statically under the configured URL prefix.

use dioxus::prelude::*;

#[cfg(feature = "server")]
use crate::{auth::require_user, rules, server_error, settings::Settings};

/// Store `bytes` at `path` (`<prefix>/<caller uid>/<name>`) and return its URL.
#[cfg(feature = "server")]
#[post("/api/blobs/upload", session: tower_sessions::Session)]
pub async fn upload_blob(path: String, bytes: Vec<u8>) -> Result<String, ServerFnError> {
    use store::{BlobStorage, FileBlobStorage};

    let user_id = require_user(&session).await?;
    rules::check_blob_path(&user_id.to_string(), &path).map_err(server_error)?;

    let blobs = &Settings::current().blobs;
    let storage = FileBlobStorage::new(blobs.dir.clone().into(), blobs.url.clone());
    storage.upload(&path, bytes).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/blobs/upload")]
pub async fn upload_blob(path: String, bytes: Vec<u8>) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
