use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Caller role. Each role has at most one active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Storage key of the role's session blob.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Role::Admin => "adminInfo",
            Role::Employee => "employeeInfo",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile returned by the backend alongside the token.
///
/// Unknown fields (`_id`, `phoneNumber`, ...) are kept in `extra` so a
/// save/load cycle does not lose anything the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An authenticated caller identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub role: Role,
    pub token: String,
    pub profile: Profile,
}

impl Session {
    pub fn new(role: Role, token: impl Into<String>, profile: Profile) -> Self {
        Self {
            role,
            token: token.into(),
            profile,
        }
    }

    /// Employee id from the profile, empty when the backend did not send one.
    pub fn employee_id(&self) -> &str {
        self.profile.employee_id.as_deref().unwrap_or_default()
    }

    pub(crate) fn to_blob(&self) -> SessionBlob {
        SessionBlob {
            token: self.token.clone(),
            profile: self.profile.clone(),
        }
    }
}

/// Persisted and wire form: `{ token, ...profile }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBlob {
    #[serde(default)]
    pub token: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl SessionBlob {
    /// Attach the role; an empty token means there is no session.
    pub fn into_session(self, role: Role) -> Option<Session> {
        if self.token.trim().is_empty() {
            return None;
        }
        Some(Session {
            role,
            token: self.token,
            profile: self.profile,
        })
    }
}
