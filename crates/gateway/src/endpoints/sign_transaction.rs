//! # POST /sign-sep-10
//!
//! SEP-10: チャレンジトランザクションへの共同署名。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use webauth_types::SignTransactionResponse;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::extract::require_str;

/// POST /sign-sep-10 — SEP-10チャレンジトランザクションへの共同署名。
/// 秘密シードとネットワークハッシュ計算は署名コアに委ねる。
pub async fn handle_sign_transaction(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SignTransactionResponse>, GatewayError> {
    let transaction = require_str(&body, "transaction")?;
    let network_passphrase = require_str(&body, "network_passphrase")?;

    let signed = webauth_signer::envelope::sign_transaction(
        transaction,
        network_passphrase,
        &state.signing_seed,
    )?;

    Ok(Json(SignTransactionResponse {
        transaction: signed,
        network_passphrase: network_passphrase.to_string(),
    }))
}
