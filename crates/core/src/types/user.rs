//! User identity types.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::email::Email;

/// Stable opaque identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Third-party provider handled by the demo sign-in stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
}

impl OAuthProvider {
    /// Lowercase provider slug, as used in the demo account email.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }

    /// Capitalized display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
        }
    }
}

/// A signed-in user account.
///
/// `None` in an `Option<User>` position means the session is anonymous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    /// Shown in the account menu; defaults to the email local part.
    pub name: String,
    /// Present only for accounts created through the OAuth stub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<OAuthProvider>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_uniqueness() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(OAuthProvider::Google.slug(), "google");
        assert_eq!(OAuthProvider::Google.display_name(), "Google");
    }

    #[test]
    fn test_user_serde_round_trip() {
        let user = User {
            id: UserId::generate(),
            email: Email::parse("a@b.co").expect("valid email"),
            name: "a".to_owned(),
            provider: None,
        };
        let json = serde_json::to_string(&user).expect("serialize");
        // provider is omitted entirely when absent
        assert!(!json.contains("provider"));
        let back: User = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, user);
    }

    #[test]
    fn test_user_serde_with_provider() {
        let user = User {
            id: UserId::generate(),
            email: Email::parse("google@versiq-demo.local").expect("valid email"),
            name: "Google".to_owned(),
            provider: Some(OAuthProvider::Google),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("\"provider\":\"google\""));
    }
}
