//! Durable local session storage.
//!
//! A tiny key/value store persisting the signed-in user's state across
//! application restarts: access token, user id, active group id, and the
//! display name pending from registration. Backed by [`redb`], so every
//! mutation is a committed transaction and survives a crash.

pub mod error;
pub mod store;

pub use error::SessionStoreError;
pub use store::{keys, Session, SessionStore};
