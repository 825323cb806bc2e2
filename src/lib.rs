pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

pub use auth::{AttachedTokens, AuthOptions, BearerToken, Completion, HeaderAuthenticator, Outcome};
pub use error::{AuthError, AuthErrorCode, ErrorPayload};
