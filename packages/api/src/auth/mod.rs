//! Email + password authentication and the session key that carries the user.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{require_user, session_user, SESSION_USER_ID_KEY};
