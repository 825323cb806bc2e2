use crate::auth::{is_separator, AuthOptions};
use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub auth: AuthOptions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("PORT")
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        let mut auth = AuthOptions::new();
        if let Some(scheme) = lookup("AUTH_SCHEME") {
            if scheme.split(is_separator).filter(|p| !p.is_empty()).count() > 1 {
                return Err(anyhow!("AUTH_SCHEME must be a single word"));
            }
            auth = auth.with_scheme(scheme.trim_matches(is_separator));
        }
        if let Some(attach_key) = lookup("AUTH_ATTACH_KEY") {
            auth = auth.with_attach_key(attach_key.trim());
        }
        if let Some(expected) = lookup("AUTH_EXPECTED_TOKEN") {
            // Headers are split on whitespace, so such a token could never match.
            if expected.trim_matches(is_separator).contains(is_separator) {
                return Err(anyhow!("AUTH_EXPECTED_TOKEN must not contain whitespace"));
            }
            auth = auth.with_expected_token(expected.trim_matches(is_separator));
        }

        Ok(Self { port, auth })
    }
}
