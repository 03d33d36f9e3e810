//! # Database module
//!
//! The shared PostgreSQL pool and the row types the server functions read. Gated
//! behind the `server` feature so client builds never pull in SQLx.
//!
//! - [`get_pool`] returns `&'static PgPool`, connecting on first use.
//! - [`NoteRow`], [`CategoryRow`], [`ProfileRow`] map table rows onto the
//!   `store` documents sent to clients.

#[cfg(feature = "server")]
mod pool;
#[cfg(feature = "server")]
mod rows;

#[cfg(feature = "server")]
pub use pool::get_pool;
#[cfg(feature = "server")]
pub use rows::{CategoryRow, NoteRow, ProfileRow};
