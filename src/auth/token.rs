use crate::error::AuthError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Extensions;
use std::collections::HashMap;
use std::fmt;

/// Credential taken from the second part of an `Authorization` header.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Keep credentials out of logs.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BearerToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BearerToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Request extension holding extracted tokens by attach key.
///
/// Handlers read it as an extractor; use `Option<AttachedTokens>` when the
/// route is reachable without a token.
#[derive(Debug, Clone, Default)]
pub struct AttachedTokens(HashMap<String, BearerToken>);

impl AttachedTokens {
    pub fn get(&self, key: &str) -> Option<&BearerToken> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, token: BearerToken) -> Option<BearerToken> {
        self.0.insert(key.into(), token)
    }

    pub(crate) fn attach(extensions: &mut Extensions, key: &str, token: BearerToken) {
        match extensions.get_mut::<AttachedTokens>() {
            Some(tokens) => {
                tokens.insert(key, token);
            }
            None => {
                let mut tokens = AttachedTokens::default();
                tokens.insert(key, token);
                extensions.insert(tokens);
            }
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AttachedTokens
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AttachedTokens>()
            .filter(|tokens| !tokens.is_empty())
            .cloned()
            .ok_or_else(AuthError::required)
    }
}
