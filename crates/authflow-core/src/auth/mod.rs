//! Authentication module: the login flow and the session state it manages.
//!
//! This module provides:
//! - `LoginController`: validates and submits the login form, one attempt at a time
//! - `SessionStore`: durable session token and "session expired" flag
//! - `RedirectResolver` / `HintStore`: where to go after login
//! - `SessionContext`: the signed-in user, observable by the rest of the app
//! - `AccessGuard`: sends unauthenticated users to the login page

pub mod context;
pub mod controller;
pub mod error;
pub mod guard;
pub mod redirect;
pub mod session;
pub mod validator;

pub use context::SessionContext;
pub use controller::{LoginController, SubmissionState, SubmitOutcome};
pub use error::{LoginError, GENERIC_FAILURE_MESSAGE};
pub use guard::{Access, AccessGuard};
pub use redirect::{HintStore, RedirectResolver};
pub use session::SessionStore;
