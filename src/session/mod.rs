//! Session store - the two persisted caller identities (admin, employee).
//!
//! Sessions are JSON blobs of the shape `{token, ...profile}` kept under one
//! storage key per role. The store never talks to the network.

pub mod model;
pub mod store;


pub use model::{Profile, Role, Session, SessionBlob};
pub use store::{FileBackend, MemoryBackend, SessionBackend, SessionError, SessionStore};
