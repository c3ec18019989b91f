//! # Gateway エラー型
//!
//! エラー種別からHTTPステータスへの対応は`IntoResponse`だけが決める。
//! 全エラーレスポンスは `{"error": "<message>"}` の形。500はクライアントに
//! 詳細を漏らさず、サーバーログにのみ残す。

use axum::http::StatusCode;
use axum::Json;
use webauth_signer::SignerError;
use webauth_types::ErrorBody;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 認証失敗（ヘッダ欠落・スキーム不一致・トークン不一致・トークン未設定）
    #[error("Unauthenticated")]
    Unauthenticated,
    /// ルート未登録
    #[error("Not Found")]
    NotFound,
    /// 署名コアのエラー
    #[error(transparent)]
    Signer(#[from] SignerError),
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            GatewayError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Unauthenticated".to_string())
            }
            GatewayError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            // 呼び出し側の誤りは修正の手がかりになる具体的なメッセージを返す
            GatewayError::Signer(SignerError::InvalidInput(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            GatewayError::Signer(e @ SignerError::Rpc(_)) => {
                tracing::error!(error = %e, "レジャー取得RPCに失敗");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            GatewayError::Signer(e @ SignerError::Internal(_)) => {
                tracing::error!(error = %e, "署名処理の内部エラー");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
