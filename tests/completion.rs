mod common;

use authorization_header::middleware::auth;
use authorization_header::auth::BoxFuture;
use authorization_header::{
    AttachedTokens, AuthError, AuthOptions, Completion, HeaderAuthenticator,
};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

async fn handler() -> &'static str {
    "reached"
}

/// Reports what the completion saw instead of running the handler on error.
async fn report(error: Option<AuthError>, req: Request, next: Next) -> Response {
    let token = req
        .extensions()
        .get::<AttachedTokens>()
        .and_then(|t| t.get("token"))
        .map(|t| t.as_str().to_string());

    match error {
        Some(err) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": err, "token": token })),
        )
            .into_response(),
        None => next.run(req).await,
    }
}

fn router(options: AuthOptions) -> Router {
    auth::apply(
        Router::new().route("/protected", get(handler)),
        Arc::new(HeaderAuthenticator::with_completion(options, report)),
    )
}

async fn error_report(options: AuthOptions, header: Option<&str>) -> Value {
    let response = router(options)
        .oneshot(common::request("/protected", header))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    common::json_body(response).await
}

#[tokio::test]
async fn completion_decides_to_proceed_on_success() {
    let response = router(AuthOptions::default())
        .oneshot(common::request("/protected", Some("Bearer qwerty")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn completion_receives_required_error() {
    let body = error_report(AuthOptions::default(), None).await;
    assert_eq!(body["error"]["code"], "E_AUTHORIZATION_REQUIRED");
    assert_eq!(body["token"], Value::Null);
}

#[tokio::test]
async fn completion_receives_format_and_type_errors() {
    let body = error_report(AuthOptions::default(), Some("Bearer")).await;
    assert_eq!(body["error"]["code"], "E_AUTHORIZATION_INVALID_FORMAT");

    let body = error_report(AuthOptions::default(), Some("Basic qwerty")).await;
    assert_eq!(body["error"]["code"], "E_AUTHORIZATION_INVALID_TYPE");
    assert_eq!(body["token"], Value::Null);
}

#[tokio::test]
async fn token_stays_attached_when_comparison_fails() {
    let body = error_report(
        AuthOptions::new().with_expected_token("invalid_token"),
        Some("Bearer qwerty"),
    )
    .await;

    assert_eq!(body["error"]["code"], "E_AUTHORIZATION_INVALID_TOKEN");
    assert_eq!(body["error"]["status"], 401);
    assert_eq!(body["token"], "qwerty");
}

#[tokio::test]
async fn custom_scheme_with_completion() {
    let response = router(AuthOptions::new().with_scheme("Basic"))
        .oneshot(common::request("/protected", Some("Basic qwerty")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn completion_runs_once_per_request_and_next_is_not_automatic() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let auth = HeaderAuthenticator::with_completion(
        AuthOptions::default(),
        move |error: Option<AuthError>, _req: Request, _next: Next| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let status = if error.is_some() {
                    StatusCode::UNAUTHORIZED
                } else {
                    StatusCode::NO_CONTENT
                };
                status.into_response()
            }
        },
    );
    let app = auth::apply(
        Router::new().route("/protected", get(handler)),
        Arc::new(auth),
    );

    let response = app
        .clone()
        .oneshot(common::request("/protected", Some("Bearer qwerty")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(common::request("/protected", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// Lets only requests carrying the expected token through; everything else
/// gets the error's own response.
struct Gate;

impl Completion for Gate {
    fn complete(&self, error: Option<AuthError>, req: Request, next: Next) -> BoxFuture<Response> {
        Box::pin(async move {
            match error {
                Some(err) => err.into_response(),
                None => next.run(req).await,
            }
        })
    }
}

#[tokio::test]
async fn struct_completion_can_forward_the_error_response() {
    let app = auth::apply(
        Router::new().route("/protected", get(handler)),
        Arc::new(HeaderAuthenticator::with_completion(
            AuthOptions::new().with_expected_token("qwerty"),
            Gate,
        )),
    );

    let response = app
        .clone()
        .oneshot(common::request("/protected", Some("Bearer qwerty")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::request("/protected", Some("Bearer nope")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::json_body(response).await;
    assert_eq!(body["code"], "E_AUTHORIZATION_INVALID_TOKEN");
}
