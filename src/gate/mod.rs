//! Access gate for protected views.
//!
//! Views check the session on entry, hand every remote result to
//! [`AccessGate::settle`] so a 401 ends the session, and serialize form
//! submissions through a [`SubmitGuard`].

pub mod access;
pub mod guard;
pub mod model;


pub use access::{AccessGate, Navigator, RouteLog};
pub use guard::{SlotHandle, SubmitGuard, SubmitTicket, ViewSlot};
pub use model::{GateState, Route};
