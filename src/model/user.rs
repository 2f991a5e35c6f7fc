use serde::{Deserialize, Serialize};

/// Identity as reported by the backend's auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// What the profile link shows. Phone-only accounts have no e-mail.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_email() {
        let user = User {
            id: "4b1c".to_string(),
            email: Some("user@example.com".to_string()),
        };
        assert_eq!(user.display_name(), "user@example.com");

        let user = User {
            id: "4b1c".to_string(),
            email: None,
        };
        assert_eq!(user.display_name(), "4b1c");
    }

    #[test]
    fn ignores_extra_auth_fields() {
        let user: User = serde_json::from_str(
            r#"{"id":"4b1c","aud":"authenticated","role":"authenticated","email":"user@example.com","app_metadata":{}}"#,
        )
        .unwrap();

        assert_eq!(user.email.as_deref(), Some("user@example.com"));
    }
}
