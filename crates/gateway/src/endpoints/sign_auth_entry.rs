//! # POST /sign-sep-45
//!
//! SEP-45: Soroban認可エントリへの共同署名。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use webauth_types::SignAuthorizationEntryResponse;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::extract::require_str;

/// POST /sign-sep-45 — Soroban認可エントリへの共同署名。
/// 秘密シードとRPC URLはサーバー設定のみから渡し、リクエストからは受け取らない。
pub async fn handle_sign_auth_entry(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SignAuthorizationEntryResponse>, GatewayError> {
    let authorization_entry = require_str(&body, "authorization_entry")?;
    let network_passphrase = require_str(&body, "network_passphrase")?;

    let signed = webauth_signer::auth_entry::sign_authorization_entry(
        authorization_entry,
        network_passphrase,
        &state.signing_seed,
        &state.rpc_url,
        state.ledger.as_ref(),
    )
    .await?;

    Ok(Json(SignAuthorizationEntryResponse {
        authorization_entry: signed,
        network_passphrase: network_passphrase.to_string(),
    }))
}
