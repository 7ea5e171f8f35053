//! Application state management for FitCheck
//!
//! This crate holds the state shared between screens: the persisted
//! session and the table of in-flight backend requests per screen.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod request;
pub mod session;

pub use request::{PendingRequest, RequestError, RequestState, RequestTracker};
pub use session::{Session, SessionState, SessionStateError, SessionStore};
