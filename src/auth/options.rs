use serde::Deserialize;
use std::fmt;

pub const DEFAULT_SCHEME: &str = "Bearer";
pub const DEFAULT_ATTACH_KEY: &str = "token";

/// Settings captured once by a [`HeaderAuthenticator`](super::HeaderAuthenticator).
///
/// Empty strings count as unset, so `scheme` and `attach_key` fall back to
/// their defaults and an empty `expected_token` disables the equality check.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthOptions {
    scheme: String,
    attach_key: String,
    expected_token: Option<String>,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            attach_key: DEFAULT_ATTACH_KEY.to_string(),
            expected_token: None,
        }
    }
}

// The expected token is the accepted credential; only its presence is shown.
impl fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthOptions")
            .field("scheme", &self.scheme())
            .field("attach_key", &self.attach_key())
            .field(
                "expected_token",
                &self.expected_token().map(|_| "***"),
            )
            .finish()
    }
}

impl AuthOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_attach_key(mut self, attach_key: impl Into<String>) -> Self {
        self.attach_key = attach_key.into();
        self
    }

    pub fn with_expected_token(mut self, expected_token: impl Into<String>) -> Self {
        self.expected_token = Some(expected_token.into());
        self
    }

    pub fn scheme(&self) -> &str {
        if self.scheme.is_empty() {
            DEFAULT_SCHEME
        } else {
            &self.scheme
        }
    }

    pub fn attach_key(&self) -> &str {
        if self.attach_key.is_empty() {
            DEFAULT_ATTACH_KEY
        } else {
            &self.attach_key
        }
    }

    pub fn expected_token(&self) -> Option<&str> {
        self.expected_token.as_deref().filter(|t| !t.is_empty())
    }
}
