use super::completion::Completion;
use super::options::AuthOptions;
use super::token::{AttachedTokens, BearerToken};
use crate::error::AuthError;
use axum::extract::Request;
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of running the header checks once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Authenticated(BearerToken),
    /// `token` is set when the header was well formed and carried the right
    /// scheme, but the token did not match the expected value.
    Rejected {
        error: AuthError,
        token: Option<BearerToken>,
    },
}

impl Outcome {
    fn rejected(error: AuthError) -> Self {
        Outcome::Rejected { error, token: None }
    }

    pub fn token(&self) -> Option<&BearerToken> {
        match self {
            Outcome::Authenticated(token) => Some(token),
            Outcome::Rejected { token, .. } => token.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&AuthError> {
        match self {
            Outcome::Authenticated(_) => None,
            Outcome::Rejected { error, .. } => Some(error),
        }
    }

    pub fn into_parts(self) -> (Option<BearerToken>, Option<AuthError>) {
        match self {
            Outcome::Authenticated(token) => (Some(token), None),
            Outcome::Rejected { error, token } => (token, Some(error)),
        }
    }

    pub fn into_result(self) -> Result<BearerToken, AuthError> {
        match self {
            Outcome::Authenticated(token) => Ok(token),
            Outcome::Rejected { error, .. } => Err(error),
        }
    }
}

/// Validates `Authorization: <scheme> <token>` and attaches the token to the
/// request under the configured key.
///
/// Built with [`HeaderAuthenticator::new`] it answers failures itself with the
/// error's status and JSON body. Built with
/// [`HeaderAuthenticator::with_completion`] every outcome goes to the
/// completion instead.
#[derive(Clone, Default)]
pub struct HeaderAuthenticator {
    options: AuthOptions,
    completion: Option<Arc<dyn Completion>>,
}

impl fmt::Debug for HeaderAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderAuthenticator")
            .field("options", &self.options)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

impl HeaderAuthenticator {
    pub fn new(options: AuthOptions) -> Self {
        Self {
            options,
            completion: None,
        }
    }

    pub fn with_completion(options: AuthOptions, completion: impl Completion) -> Self {
        Self {
            options,
            completion: Some(Arc::new(completion)),
        }
    }

    pub fn options(&self) -> &AuthOptions {
        &self.options
    }

    /// Runs presence, format, scheme and equality checks in that order and
    /// stops at the first failure.
    ///
    /// Scheme and token are separated by runs of [`is_separator`] characters.
    pub fn inspect(&self, header: Option<&str>) -> Outcome {
        let Some(value) = header.filter(|v| !v.is_empty()) else {
            return Outcome::rejected(AuthError::required());
        };

        let parts: Vec<&str> = value.split(is_separator).filter(|p| !p.is_empty()).collect();
        let &[scheme, token] = parts.as_slice() else {
            return Outcome::rejected(AuthError::invalid_format());
        };

        if scheme != self.options.scheme() {
            return Outcome::rejected(AuthError::invalid_type(self.options.scheme()));
        }

        let token = BearerToken::new(token);
        match self.options.expected_token() {
            Some(expected) if token.as_str() != expected => Outcome::Rejected {
                error: AuthError::invalid_token(),
                token: Some(token),
            },
            _ => Outcome::Authenticated(token),
        }
    }

    /// Reads `authorization` as UTF-8, or byte-per-char latin-1 when it is not
    /// valid UTF-8.
    pub fn inspect_headers(&self, headers: &HeaderMap) -> Outcome {
        let value = headers
            .get(header::AUTHORIZATION)
            .map(|h| decode_header(h.as_bytes()));
        self.inspect(value.as_deref())
    }

    pub fn authenticate(&self, header: Option<&str>) -> Result<BearerToken, AuthError> {
        self.inspect(header).into_result()
    }

    pub fn authenticate_headers(&self, headers: &HeaderMap) -> Result<BearerToken, AuthError> {
        self.inspect_headers(headers).into_result()
    }

    /// Validates the request and reports the outcome.
    ///
    /// A derived token is attached even when the equality check fails, unless
    /// the rejection is answered directly.
    pub async fn handle(&self, mut request: Request, next: Next) -> Response {
        let (token, error) = self.inspect_headers(request.headers()).into_parts();
        let attach_key = self.options.attach_key();

        if let Some(err) = &error {
            warn!(
                code = %err.code(),
                method = %request.method(),
                path = request.uri().path(),
                "Authorization header rejected"
            );
        }

        let Some(completion) = &self.completion else {
            if let Some(err) = error {
                return err.into_response();
            }
            if let Some(token) = token {
                AttachedTokens::attach(request.extensions_mut(), attach_key, token);
                debug!(attach_key, "Authorization token attached");
            }
            return next.run(request).await;
        };

        if let Some(token) = token {
            AttachedTokens::attach(request.extensions_mut(), attach_key, token);
            debug!(attach_key, "Authorization token attached");
        }
        completion.complete(error, request, next).await
    }
}

/// The ECMAScript `\s` class: Unicode `White_Space` without U+0085, plus U+FEFF.
pub fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}

fn decode_header(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(value) => Cow::Borrowed(value),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}
