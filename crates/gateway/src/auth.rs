//! # Bearer認証
//!
//! 保護ルートに適用するBearerトークン認証ミドルウェア。
//! トークンはプロセス全体で単一の共有シークレットで、ローテーションは
//! プロセス再起動で行う。比較は常に定数時間。

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use crate::config::GatewayState;
use crate::error::GatewayError;

/// Bearerトークンを検証するミドルウェア。
/// ヘッダ欠落・スキーム不一致・トークン不一致・サーバー側トークン未設定は
/// 全て401で、ハンドラは一切呼ばれない。
pub async fn require_bearer(
    State(state): State<Arc<GatewayState>>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(GatewayError::Unauthenticated)?;

    let presented = header
        .strip_prefix("Bearer ")
        .ok_or(GatewayError::Unauthenticated)?;

    // トークン未設定のサーバーはいかなるリクエストも認証できない
    let configured = state
        .auth_token
        .as_deref()
        .ok_or(GatewayError::Unauthenticated)?;

    if !token_matches(presented, configured) {
        tracing::warn!("Bearerトークンの検証に失敗");
        return Err(GatewayError::Unauthenticated);
    }

    Ok(next.run(request).await)
}

/// タイミングサイドチャネルを避けるための定数時間比較。
fn token_matches(presented: &str, configured: &str) -> bool {
    presented
        .as_bytes()
        .ct_eq(configured.as_bytes())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_matches() {
        assert!(token_matches("secret", "secret"));
        assert!(!token_matches("secret", "other"));
        assert!(!token_matches("secret", "secre"));
        assert!(!token_matches("secre", "secret"));
        assert!(!token_matches("", "secret"));
    }
}
