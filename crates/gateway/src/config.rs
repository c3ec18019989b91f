//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! 状態は起動時に一度だけ構築し、以後一切変更しない。

use std::sync::Arc;

use webauth_signer::{Keypair, LedgerLookup};

/// 環境変数から読み込む設定。
pub struct Config {
    /// 待ち受けアドレス
    pub listen_addr: String,
    /// 署名用秘密シード（`S...`）
    pub signing_seed: String,
    /// Bearer認証トークン。未設定なら保護ルートは常に401。
    pub auth_token: Option<String>,
    /// Soroban RPCエンドポイント（SEP-45の有効期限計算用）
    pub rpc_url: String,
    /// stellar.toml公開用のネットワークパスフレーズ
    pub network_passphrase: String,
}

impl Config {
    /// 環境変数から構築する。
    pub fn from_env() -> Self {
        let signing_seed = match std::env::var("SIGNING_SEED") {
            Ok(seed) => seed,
            Err(_) => {
                // 開発環境用: ランダムキーを生成
                tracing::warn!(
                    "SIGNING_SEEDが未設定です。ランダムキーを生成します（開発環境用）"
                );
                let mut bytes = [0u8; 32];
                rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut bytes);
                stellar_strkey::ed25519::PrivateKey(bytes).to_string()
            }
        };

        let auth_token = std::env::var("AUTH_TOKEN").ok().filter(|t| !t.is_empty());
        if auth_token.is_none() {
            tracing::warn!("AUTH_TOKENが未設定です。保護ルートは全てのリクエストを拒否します");
        }

        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            signing_seed,
            auth_token,
            rpc_url: std::env::var("RPC_URL")
                .unwrap_or_else(|_| "https://soroban-testnet.stellar.org".to_string()),
            network_passphrase: std::env::var("NETWORK_PASSPHRASE")
                .unwrap_or_else(|_| "Test SDF Network ; September 2015".to_string()),
        }
    }
}

/// Gatewayの共有状態。
pub struct GatewayState {
    /// 署名用秘密シード（`S...`）。ログにもレスポンスにも出さない。
    pub signing_seed: String,
    /// 署名鍵のアカウントID（`G...`）
    pub account_id: String,
    /// Bearer認証トークン
    pub auth_token: Option<String>,
    /// Soroban RPCエンドポイント
    pub rpc_url: String,
    /// ネットワークパスフレーズ
    pub network_passphrase: String,
    /// 最新レジャー取得クライアント（トレイトで抽象化）
    pub ledger: Arc<dyn LedgerLookup>,
}

impl GatewayState {
    /// 設定から状態を構築する。秘密シードの妥当性はここで検証する。
    pub fn new(config: Config, ledger: Arc<dyn LedgerLookup>) -> anyhow::Result<Self> {
        let account_id = Keypair::from_secret_seed(&config.signing_seed)?.account_id();
        Ok(Self {
            signing_seed: config.signing_seed,
            account_id,
            auth_token: config.auth_token,
            rpc_url: config.rpc_url,
            network_passphrase: config.network_passphrase,
            ledger,
        })
    }
}
