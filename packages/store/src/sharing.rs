//! # Sharing notes by username
//!
//! [`resolve_user_by_username`] turns a typed username into a [`SharedUser`] with
//! an exact, case-sensitive lookup. [`ShareList`] is the in-progress `shared_with`
//! set of a note form: it rejects duplicates before touching the backend and
//! never admits the note's owner.

use crate::backend::ProfileStore;
use crate::documents::validate_all;
use crate::error::NotesError;
use crate::models::{SharedUser, UserProfile};

/// Look up a profile by exact username.
///
/// With several matches the first is returned, unless `require_unique` is set,
/// in which case the lookup fails with [`NotesError::AmbiguousUsername`].
pub async fn resolve_user_by_username<P: ProfileStore>(
    profiles: &P,
    username: &str,
    require_unique: bool,
) -> Result<SharedUser, NotesError> {
    let docs = profiles.profiles_by_username(username).await?;
    let matches: Vec<UserProfile> = validate_all("profile", docs);
    // The store filters already; guard against backends with looser matching.
    let mut matches = matches.into_iter().filter(|p| p.username == username);

    let first = matches
        .next()
        .ok_or_else(|| NotesError::not_found("user", username))?;
    if require_unique && matches.next().is_some() {
        return Err(NotesError::AmbiguousUsername(username.to_string()));
    }
    Ok(SharedUser::from(&first))
}

/// The users a note form will share with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareList {
    owner_id: String,
    users: Vec<SharedUser>,
}

impl ShareList {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            users: Vec::new(),
        }
    }

    /// Rebuild the list for an existing note from its stored uids.
    ///
    /// A uid without a profile is kept, showing the uid as its name.
    pub async fn load<P: ProfileStore>(
        profiles: &P,
        owner_id: &str,
        uids: impl IntoIterator<Item = String>,
    ) -> Result<Self, NotesError> {
        let mut list = Self::new(owner_id);
        for uid in uids {
            if uid == owner_id || list.contains_uid(&uid) {
                continue;
            }
            let docs = profiles.profiles_by_uid(&uid).await?;
            let found: Vec<UserProfile> = validate_all("profile", docs);
            let user = match found.first() {
                Some(profile) => SharedUser::from(profile),
                None => SharedUser {
                    username: uid.clone(),
                    uid,
                },
            };
            list.users.push(user);
        }
        Ok(list)
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn users(&self) -> &[SharedUser] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains_username(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }

    pub fn contains_uid(&self, uid: &str) -> bool {
        self.users.iter().any(|u| u.uid == uid)
    }

    /// Resolve `username` and add it.
    ///
    /// A username already in the list is rejected without a backend call.
    pub async fn add<P: ProfileStore>(
        &mut self,
        profiles: &P,
        username: &str,
        require_unique: bool,
    ) -> Result<&SharedUser, NotesError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(NotesError::ValidationFailed("username"));
        }
        if self.contains_username(username) {
            return Err(NotesError::AlreadyShared(username.to_string()));
        }

        let user = resolve_user_by_username(profiles, username, require_unique).await?;
        if user.uid == self.owner_id {
            return Err(NotesError::CannotShareWithOwner);
        }
        if self.contains_uid(&user.uid) {
            return Err(NotesError::AlreadyShared(user.username));
        }

        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    /// Remove a user by uid. Returns whether anything was removed.
    pub fn remove(&mut self, uid: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.uid != uid);
        self.users.len() != before
    }

    /// The uids to persist as `shared_with`.
    pub fn uids(&self) -> impl Iterator<Item = String> + '_ {
        self.users.iter().map(|u| u.uid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::ProfileDocument;
    use crate::memory::MemoryBackend;

    fn backend_with(profiles: &[(&str, &str)]) -> MemoryBackend {
        let backend = MemoryBackend::new();
        for (i, (uid, username)) in profiles.iter().enumerate() {
            backend.put_profile_document(ProfileDocument {
                id: format!("p{i}"),
                uid: Some(uid.to_string()),
                username: Some(username.to_string()),
                ..ProfileDocument::default()
            });
        }
        backend
    }

    #[tokio::test]
    async fn test_resolve_exact_match() {
        let backend = backend_with(&[("u2", "bob")]);
        let user = resolve_user_by_username(&backend, "bob", false).await.unwrap();
        assert_eq!(user, SharedUser { uid: "u2".into(), username: "bob".into() });
    }

    #[tokio::test]
    async fn test_resolve_is_case_sensitive() {
        let backend = backend_with(&[("u2", "bob")]);
        let err = resolve_user_by_username(&backend, "Bob", false).await.unwrap_err();
        assert_eq!(err, NotesError::NotFound { entity: "user", key: "Bob".into() });
    }

    #[tokio::test]
    async fn test_resolve_duplicates() {
        let backend = backend_with(&[("u2", "bob"), ("u3", "bob")]);
        let first = resolve_user_by_username(&backend, "bob", false).await.unwrap();
        assert_eq!(first.uid, "u2");

        let err = resolve_user_by_username(&backend, "bob", true).await.unwrap_err();
        assert_eq!(err, NotesError::AmbiguousUsername("bob".into()));
    }

    #[tokio::test]
    async fn test_add_twice_skips_backend() {
        let backend = backend_with(&[("u2", "bob")]);
        let mut list = ShareList::new("u1");

        list.add(&backend, "bob", false).await.unwrap();
        let calls = backend.call_count();

        let err = list.add(&backend, " bob ", false).await.unwrap_err();
        assert_eq!(err, NotesError::AlreadyShared("bob".into()));
        assert_eq!(backend.call_count(), calls);
        assert_eq!(list.users().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_owner_and_blank() {
        let backend = backend_with(&[("u1", "alice")]);
        let mut list = ShareList::new("u1");

        assert_eq!(
            list.add(&backend, "alice", false).await.unwrap_err(),
            NotesError::CannotShareWithOwner
        );
        assert_eq!(
            list.add(&backend, "  ", false).await.unwrap_err(),
            NotesError::ValidationFailed("username")
        );
        assert_eq!(backend.call_count(), 1);
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_load_and_remove() {
        let backend = backend_with(&[("u2", "bob")]);
        let mut list = ShareList::load(
            &backend,
            "u1",
            vec!["u2".to_string(), "u1".to_string(), "ghost".to_string()],
        )
        .await
        .unwrap();

        let names: Vec<&str> = list.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "ghost"]);

        assert!(list.remove("ghost"));
        assert!(!list.remove("ghost"));
        assert_eq!(list.uids().collect::<Vec<_>>(), vec!["u2".to_string()]);
    }
}
