//! # GET /.well-known/stellar.toml
//!
//! SEP-1: ドメインのStellar情報公開。

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::config::GatewayState;

/// GET /.well-known/stellar.toml — SEP-1ドメイン情報。
/// 署名アカウントと対象ネットワークをtext/plainのTOMLで公開する。
pub async fn handle_stellar_toml(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    let body = format!(
        "ACCOUNTS = [ \"{account}\" ]\nSIGNING_KEY = \"{account}\"\nNETWORK_PASSPHRASE = \"{passphrase}\"\n",
        account = state.account_id,
        passphrase = state.network_passphrase,
    );
    ([(header::CONTENT_TYPE, "text/plain")], body)
}
