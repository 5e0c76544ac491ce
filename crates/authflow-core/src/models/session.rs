use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authorization tier returned with a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Developer,
    Tester,
    /// Any role without a default landing page, kept verbatim.
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Developer => "developer",
            Role::Tester => "tester",
            Role::Other(s) => s,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Other(String::new())
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Role::Admin,
            "developer" => Role::Developer,
            "tester" => Role::Tester,
            _ => Role::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw success body of the login endpoint.
///
/// Every field is optional on the wire; use [`LoginResponse::into_session`]
/// to obtain a usable session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Remaining user fields (name, email, id, ...).
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl LoginResponse {
    /// Convert into a session, or `None` if no usable token was issued.
    pub fn into_session(self) -> Option<SessionPayload> {
        let token = self.token.filter(|t| !t.is_empty())?;
        Some(SessionPayload {
            token,
            role: self.role.unwrap_or_default(),
            profile: self.profile,
        })
    }
}

/// An authenticated session: the issued token, the user's role and the rest
/// of the user record returned by the server.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub token: String,
    pub role: Role,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl SessionPayload {
    /// Look up a string field of the user record, e.g. `"name"`.
    pub fn profile_str(&self, key: &str) -> Option<&str> {
        self.profile.get(key).and_then(Value::as_str)
    }
}

impl fmt::Debug for SessionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionPayload")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("profile", &self.profile)
            .finish()
    }
}
