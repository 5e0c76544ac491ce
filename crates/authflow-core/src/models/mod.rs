//! Data types exchanged with the authentication endpoint.

pub mod credentials;
pub mod session;

pub use credentials::Credentials;
pub use session::{LoginResponse, Role, SessionPayload};
