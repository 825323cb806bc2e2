use crate::error::AuthError;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Caller-supplied completion for callback mode.
///
/// Runs once per request with the validation error (if any), the request
/// carrying any attached token, and the rest of the pipeline. Whether `next`
/// runs is up to the completion.
pub trait Completion: Send + Sync + 'static {
    fn complete(&self, error: Option<AuthError>, request: Request, next: Next)
        -> BoxFuture<Response>;
}

impl<F, Fut> Completion for F
where
    F: Fn(Option<AuthError>, Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn complete(
        &self,
        error: Option<AuthError>,
        request: Request,
        next: Next,
    ) -> BoxFuture<Response> {
        Box::pin(self(error, request, next))
    }
}
