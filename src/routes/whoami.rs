use crate::app::AppState;
use crate::auth::AttachedTokens;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// Reports which key the token was attached under. The token itself is not
/// echoed back.
pub async fn whoami(State(state): State<AppState>, tokens: AttachedTokens) -> Json<Value> {
    let attach_key = state.cfg.auth.attach_key();
    let token = tokens.get(attach_key);

    Json(json!({
        "attachKey": attach_key,
        "authenticated": token.is_some(),
        "tokenLength": token.map(|t| t.as_str().len()),
    }))
}
