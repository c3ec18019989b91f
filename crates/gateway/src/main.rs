//! # WebAuth Signer Gateway
//!
//! SEP-10 / SEP-45 のドメイン共同署名サービス。
//!
//! ## 役割
//! - Bearerトークンによる保護ルートの認証（定数時間比較）
//! - CORSヘッダの付与とOPTIONSプリフライト処理
//! - SEP-10 チャレンジトランザクションへの共同署名
//! - SEP-45 Soroban認可エントリへの共同署名
//! - SEP-1 stellar.toml の公開
//!
//! ## API エンドポイント
//! - `GET /health` — 死活監視
//! - `GET /.well-known/stellar.toml` — SEP-1ドメイン情報
//! - `POST /sign-sep-10` — SEP-10署名（Bearer認証）
//! - `POST /sign-sep-45` — SEP-45署名（Bearer認証）

mod auth;
mod config;
mod cors;
mod endpoints;
mod error;
mod extract;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use webauth_signer::HttpLedgerLookup;

use crate::config::{Config, GatewayState};
use crate::error::GatewayError;

/// ルータを構築する。ルート登録は起動時の一度きりで、以後変更しない。
fn app(state: Arc<GatewayState>) -> Router {
    let protected = Router::new()
        .route("/sign-sep-10", post(endpoints::handle_sign_transaction))
        .route("/sign-sep-45", post(endpoints::handle_sign_auth_entry))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/health", get(endpoints::handle_health))
        .route(
            "/.well-known/stellar.toml",
            get(endpoints::handle_stellar_toml),
        )
        .merge(protected)
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_not_found)
        .layer(axum::middleware::from_fn(cors::apply_cors))
        .with_state(state)
}

/// 未登録の (メソッド, パス) は一律404。
async fn handle_not_found() -> GatewayError {
    GatewayError::NotFound
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let listen_addr = config.listen_addr.clone();
    let state = Arc::new(GatewayState::new(
        config,
        Arc::new(HttpLedgerLookup::new()),
    )?);

    tracing::info!(account_id = %state.account_id, "署名用アカウント");
    tracing::info!("Gatewayを {} で起動します", listen_addr);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
