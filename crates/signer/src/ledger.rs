//! # 最新レジャー取得
//!
//! SEP-45の署名有効期限計算に使う、Soroban RPC `getLatestLedger` の
//! 薄いクライアント。リトライ・タイムアウトはここでは巻かない。
//! 必要なら呼び出し側がこの境界で方針を足す。

use crate::error::SignerError;

/// 最新レジャー番号の問い合わせ。
/// テストではモック実装に差し替えられるようトレイトで抽象化する。
#[async_trait::async_trait]
pub trait LedgerLookup: Send + Sync {
    /// RPCエンドポイントに現在のレジャー番号を問い合わせる。
    /// 転送エラー・RPCエラー・`sequence`欠落はいずれも`Rpc`として返す。
    async fn latest_ledger(&self, rpc_url: &str) -> Result<u32, SignerError>;
}

/// JSON-RPCによる`LedgerLookup`実装。
pub struct HttpLedgerLookup {
    client: reqwest::Client,
}

impl HttpLedgerLookup {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpLedgerLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LedgerLookup for HttpLedgerLookup {
    async fn latest_ledger(&self, rpc_url: &str) -> Result<u32, SignerError> {
        let rpc_request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getLatestLedger"
        });

        let response = self
            .client
            .post(rpc_url)
            .json(&rpc_request)
            .send()
            .await
            .map_err(|e| SignerError::Rpc(format!("RPC送信失敗: {e}")))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SignerError::Rpc(format!("RPCレスポンスのパースに失敗: {e}")))?;

        if let Some(error) = body.get("error") {
            return Err(SignerError::Rpc(format!(
                "getLatestLedgerがエラーを返しました: {error}"
            )));
        }

        let sequence = body
            .get("result")
            .and_then(|r| r.get("sequence"))
            .and_then(|v| v.as_u64())
            .ok_or_else(|| SignerError::Rpc("RPCレスポンスにsequenceがありません".to_string()))?;

        let sequence = u32::try_from(sequence)
            .map_err(|_| SignerError::Rpc(format!("sequenceがu32の範囲外です: {sequence}")))?;

        tracing::debug!(sequence, "最新レジャーを取得");
        Ok(sequence)
    }
}
