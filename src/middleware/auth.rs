use crate::auth::HeaderAuthenticator;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::sync::Arc;

pub type AuthState = Arc<HeaderAuthenticator>;

/// For use with `middleware::from_fn_with_state`.
pub async fn authorization_header(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    auth.handle(req, next).await
}

/// Puts every route already added to `router` behind the authenticator.
pub fn apply<S>(router: Router<S>, auth: AuthState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(auth, authorization_header))
}
