//! `Authorization` header parsing and the completion protocol that reports
//! its result to an axum pipeline.

mod authenticator;
mod completion;
mod options;
mod token;

pub use authenticator::{is_separator, HeaderAuthenticator, Outcome};
pub use completion::{BoxFuture, Completion};
pub use options::{AuthOptions, DEFAULT_ATTACH_KEY, DEFAULT_SCHEME};
pub use token::{AttachedTokens, BearerToken};
