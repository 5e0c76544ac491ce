//! REST API client module for the authentication service.
//!
//! This module provides the `AuthClient` trait the login flow calls, and
//! `HttpAuthClient`, which posts `{ email, password }` to the login
//! endpoint and returns the raw session payload.

pub mod client;
pub mod error;

pub use client::{AuthClient, HttpAuthClient};
pub use error::ApiError;
