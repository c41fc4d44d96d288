use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Secret;

/// Metadata about an incoming request, as seen by the session gate.
#[derive(Debug)]
pub struct RequestMeta {
    /// Unique identifier for this request
    pub request_id: String,
    /// Opaque session token presented by the client, if any
    pub session_token: Option<Secret<String>>,
}

/// The authenticated user making the current request.
///
/// Owned by the external authentication provider and immutable for the
/// lifetime of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Unique identifier for this principal
    pub id: String,
    /// Display name
    pub display_name: String,
    /// Unique handle
    pub username: String,
    /// Contact address, never part of the public projection
    pub email: String,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Reference to the avatar image, if one is set
    pub avatar_ref: Option<String>,
}

impl Principal {
    /// Creates a principal with the given id and display name.
    ///
    /// The username defaults to the id and the email is left empty; use the
    /// struct fields directly when the session store supplies more detail.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            username: id.clone(),
            id,
            display_name: display_name.into(),
            email: String::new(),
            created_at: Utc::now(),
            avatar_ref: None,
        }
    }
}

/// Public profile of a room participant, as handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Participant identifier
    pub id: String,
    /// Display name
    pub display_name: String,
    /// Unique handle
    pub username: String,
    /// Reference to the avatar image, if one is set
    pub avatar_ref: Option<String>,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for UserProfile {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.id.clone(),
            display_name: p.display_name.clone(),
            username: p.username.clone(),
            avatar_ref: p.avatar_ref.clone(),
            created_at: p.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_projection_drops_email() {
        let mut p = Principal::new("u1", "Alice");
        p.email = "alice@example.com".to_string();

        let profile = UserProfile::from(&p);
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.display_name, "Alice");

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("alice@example.com"));
        assert!(json.contains("displayName"));
    }

    #[test]
    fn request_meta_debug_redacts_token() {
        let meta = RequestMeta {
            request_id: "req-1".to_string(),
            session_token: Some(Secret::new("sess-abc".to_string())),
        };
        let out = format!("{:?}", meta);
        assert!(out.contains("req-1"));
        assert!(!out.contains("sess-abc"));
    }

    #[test]
    fn principal_new_defaults_username_to_id() {
        let p = Principal::new("u7", "Gus");
        assert_eq!(p.username, "u7");
        assert!(p.avatar_ref.is_none());
    }
}
