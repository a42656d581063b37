use std::env::{self, VarError};

use base64::{prelude::BASE64_STANDARD as base64, Engine};
use miette::Diagnostic;

use crate::service::CredentialKeys;

/// Secrets for one service, read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { user: String, token: String },
    Token { token: String },
}

impl Credentials {
    /// Load every variable named by `keys`. Any one missing fails the whole load, so a partial
    /// credential is never used.
    ///
    /// ## Errors
    /// 1. A variable is unset, empty, or not unicode
    pub fn from_env(keys: &CredentialKeys) -> Result<Self, Error> {
        Ok(match keys {
            CredentialKeys::Basic { user, token } => Self::Basic {
                user: load_value(user)?,
                token: load_value(token)?,
            },
            CredentialKeys::Token { token } => Self::Token {
                token: load_value(token)?,
            },
        })
    }

    /// The value for the `Authorization` header.
    pub(crate) fn authorization_header(&self) -> String {
        match self {
            Self::Basic { user, token } => {
                format!("Basic {}", base64.encode(format!("{user}:{token}")))
            }
            Self::Token { token } => format!("token {token}"),
        }
    }
}

// Secrets stay out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { user, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("token", &"***")
                .finish(),
            Self::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
        }
    }
}

pub(crate) fn load_value(key: &str) -> Result<String, Error> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            log::trace!("Loaded {key} from the environment");
            Ok(value)
        }
        Ok(_) | Err(VarError::NotPresent) => Err(Error::MissingCredential {
            key: key.to_string(),
        }),
        Err(VarError::NotUnicode(_)) => Err(Error::NotUnicode {
            key: key.to_string(),
        }),
    }
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum Error {
    #[error("The environment variable {key} is not set")]
    #[diagnostic(
        code(app_config::missing_credential),
        help("Export {key} before running. Atlassian tokens come from https://id.atlassian.com/manage-profile/security/api-tokens, GitHub tokens from your host's developer settings.")
    )]
    MissingCredential { key: String },
    #[error("The environment variable {key} is not valid unicode")]
    #[diagnostic(code(app_config::not_unicode))]
    NotUnicode { key: String },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn basic_header() {
        let credentials = Credentials::Basic {
            user: "me@example.com".to_string(),
            token: "secret".to_string(),
        };
        assert_eq!(
            credentials.authorization_header(),
            "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0"
        );
    }

    #[test]
    fn token_header() {
        let credentials = Credentials::Token {
            token: "ghp_abc".to_string(),
        };
        assert_eq!(credentials.authorization_header(), "token ghp_abc");
    }

    #[test]
    fn debug_hides_secrets() {
        let credentials = Credentials::Basic {
            user: "me@example.com".to_string(),
            token: "secret".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("me@example.com"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn missing_variable() {
        let keys = CredentialKeys::Token {
            token: "REVLINK_TEST_DEFINITELY_UNSET_TOKEN".to_string(),
        };
        let err = Credentials::from_env(&keys).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredential { key } if key == "REVLINK_TEST_DEFINITELY_UNSET_TOKEN"
        ));
    }

    #[test]
    fn partial_basic_credential_fails() {
        env::set_var("REVLINK_TEST_PARTIAL_USER", "me@example.com");
        let keys = CredentialKeys::Basic {
            user: "REVLINK_TEST_PARTIAL_USER".to_string(),
            token: "REVLINK_TEST_PARTIAL_TOKEN_UNSET".to_string(),
        };
        let err = Credentials::from_env(&keys).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCredential { key } if key == "REVLINK_TEST_PARTIAL_TOKEN_UNSET"
        ));
    }

    #[test]
    fn loads_present_values() {
        env::set_var("REVLINK_TEST_PRESENT_TOKEN", "ghp_present");
        let keys = CredentialKeys::Token {
            token: "REVLINK_TEST_PRESENT_TOKEN".to_string(),
        };
        assert_eq!(
            Credentials::from_env(&keys).unwrap(),
            Credentials::Token {
                token: "ghp_present".to_string()
            }
        );
    }
}
