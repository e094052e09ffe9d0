use serde::{Deserialize, Serialize};

/// Role names understood by the token codec and the access gate.
///
/// Authorization matches on these exact strings. The mapping from stored
/// role rows is keyed by name, never by positional id, so reseeding roles
/// in a different order cannot silently change who is a super admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleName {
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "USER")]
    User,
}

impl RoleName {
    /// Look up the claim role for a stored role name.
    ///
    /// Returns `None` for unknown names; callers treat that as a
    /// data-integrity error, never as a default role.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SUPER_ADMIN" => Some(RoleName::SuperAdmin),
            "USER" => Some(RoleName::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::SuperAdmin => "SUPER_ADMIN",
            RoleName::User => "USER",
        }
    }
}

/// Verified session token payload.
///
/// Never persisted; lives for one request once the access gate attaches it
/// to the request extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's numeric id, carried as a string
    pub sub: String,
    /// Role names granted at login time
    pub roles: Vec<RoleName>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}
