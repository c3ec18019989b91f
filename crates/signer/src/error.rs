//! # 署名処理のエラー型
//!
//! エラーは3種に分類する。HTTPステータスへの対応はGateway側が
//! この区分だけから一意に決める。

/// 署名コアのエラー型。
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// 呼び出し側の誤り（不正なXDR、フィールド欠落、アドレス不一致、不正な鍵）。
    /// メッセージはそのままクライアントに返してよい。
    #[error("{0}")]
    InvalidInput(String),
    /// Soroban RPC呼び出しの失敗。既定値への黙殺はせず必ず伝播する。
    #[error("RPC failure: {0}")]
    Rpc(String),
    /// 検証通過後の署名・再エンコード段階の内部エラー。クライアントの誤りではない。
    #[error("internal error: {0}")]
    Internal(String),
}
