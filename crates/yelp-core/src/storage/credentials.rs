//! Client credentials used to obtain a bearer token
//!
//! Values arrive from the command line (or `YELP_CLIENT_ID` / `YELP_CLIENT_SECRET`
//! through clap) and fall back to the `[credentials]` table of the config file.

use super::config::{CredentialSettings, DEFAULT_GRANT_TYPE};
use crate::error::AuthError;
use std::fmt;

#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            grant_type: DEFAULT_GRANT_TYPE.to_string(),
        }
    }

    pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
        self.grant_type = grant_type.into();
        self
    }

    /// Merge explicit values over stored settings. Empty strings count as unset.
    pub fn resolve(
        client_id: Option<String>,
        client_secret: Option<String>,
        settings: &CredentialSettings,
    ) -> Result<Self, AuthError> {
        let client_id = first_non_empty(client_id, settings.client_id.clone()).ok_or_else(|| {
            AuthError::MissingCredentials {
                field: "client_id".to_string(),
            }
        })?;
        let client_secret = first_non_empty(client_secret, settings.client_secret.clone())
            .ok_or_else(|| AuthError::MissingCredentials {
                field: "client_secret".to_string(),
            })?;
        let grant_type = first_non_empty(settings.grant_type.clone(), None)
            .unwrap_or_else(|| DEFAULT_GRANT_TYPE.to_string());

        Ok(Self::new(client_id, client_secret).with_grant_type(grant_type))
    }

    /// Form body sent to the token endpoint
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", self.grant_type.as_str()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"*****")
            .field("grant_type", &self.grant_type)
            .finish()
    }
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.filter(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: Option<&str>, secret: Option<&str>) -> CredentialSettings {
        CredentialSettings {
            client_id: id.map(str::to_string),
            client_secret: secret.map(str::to_string),
            grant_type: None,
        }
    }

    #[test]
    fn test_explicit_values_win_over_settings() {
        let creds = Credentials::resolve(
            Some("cli-id".to_string()),
            Some("cli-secret".to_string()),
            &stored(Some("file-id"), Some("file-secret")),
        )
        .expect("credentials should resolve");

        assert_eq!(creds.client_id, "cli-id");
        assert_eq!(creds.client_secret, "cli-secret");
        assert_eq!(creds.grant_type, "client_credentials");
    }

    #[test]
    fn test_empty_values_fall_back_to_settings() {
        let creds = Credentials::resolve(
            Some(String::new()),
            None,
            &stored(Some("file-id"), Some("file-secret")),
        )
        .expect("credentials should resolve");

        assert_eq!(creds.client_id, "file-id");
        assert_eq!(creds.client_secret, "file-secret");
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let result = Credentials::resolve(Some("id".to_string()), None, &stored(None, None));
        match result {
            Err(AuthError::MissingCredentials { field }) => assert_eq!(field, "client_secret"),
            other => panic!("Expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_grant_type_from_settings() {
        let mut settings = stored(Some("id"), Some("secret"));
        settings.grant_type = Some("authorization_code".to_string());

        let creds = Credentials::resolve(None, None, &settings).expect("credentials should resolve");
        assert_eq!(creds.grant_type, "authorization_code");
    }

    #[test]
    fn test_debug_masks_secret() {
        let creds = Credentials::new("id", "super-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("id"));
        assert!(!debug.contains("super-secret"));
    }
}
