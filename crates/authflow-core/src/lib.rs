//! Client-side login flow.
//!
//! Collects credentials, checks them locally, exchanges them for a session
//! token, persists the session and decides where the user goes next.

pub mod api;
pub mod auth;
pub mod config;
pub mod host;
pub mod models;
pub mod storage;

pub use api::{ApiError, AuthClient, HttpAuthClient};
pub use auth::{
    Access, AccessGuard, HintStore, LoginController, LoginError, RedirectResolver, SessionContext,
    SessionStore, SubmissionState, SubmitOutcome,
};
pub use config::Config;
pub use host::{Navigator, Notifier};
pub use models::{Credentials, LoginResponse, Role, SessionPayload};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
