use serde::{Deserialize, Serialize};

/// Role value that grants admin access
pub const ADMIN_ROLE: &str = "admin";

/// Per-user attributes carried by a session
///
/// Owned by whatever authenticates users; the gate only reads it.
/// An absent boolean is not the same as `false`: only an explicit `false`
/// fails the `verified` and `author` checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_author: Option<bool>,
}

impl SessionAttributes {
    /// Session for a signed-in user with no other attributes set
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    pub fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = Some(is_verified);
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn author(mut self, is_author: bool) -> Self {
        self.is_author = Some(is_author);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let attributes = SessionAttributes::for_user("bob")
            .verified(true)
            .with_role("user")
            .author(false);

        let json = serde_json::to_value(&attributes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "bob",
                "isVerified": true,
                "role": "user",
                "isAuthor": false,
            })
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_absent() {
        let attributes: SessionAttributes = serde_json::from_str(r#"{"username":"ann"}"#).unwrap();
        assert_eq!(attributes.username.as_deref(), Some("ann"));
        assert_eq!(attributes.is_verified, None);
        assert_eq!(attributes.is_author, None);
        assert!(!attributes.is_admin());
    }

    #[test]
    fn test_admin_role() {
        assert!(SessionAttributes::default().with_role("admin").is_admin());
        assert!(!SessionAttributes::default().with_role("Admin").is_admin());
        assert!(!SessionAttributes::default().is_admin());
    }
}
