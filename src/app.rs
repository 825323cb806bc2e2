use crate::auth::HeaderAuthenticator;
use crate::config::Config;
use crate::middleware;
use crate::routes::{health::healthz, whoami::whoami};
use axum::{routing::get, Router};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
}

pub fn build_router(cfg: Config) -> Router {
    let auth = Arc::new(HeaderAuthenticator::new(cfg.auth.clone()));
    let state = AppState { cfg };

    // Public routes (no auth)
    let public = Router::new().route("/healthz", get(healthz));

    // Protected routes (with auth)
    let protected = middleware::auth::apply(
        Router::new().route("/api/v1/whoami", get(whoami)),
        auth,
    );

    middleware::http::apply(public.merge(protected).with_state(state))
}
