//! # WebAuth Signer 共有型定義
//!
//! SEP-10 / SEP-45 署名エンドポイントのリクエスト・レスポンス構造体を
//! Rust構造体として提供する。
//!
//! ## エンコーディング規則
//! - Base64: XDRバイナリ（トランザクションエンベロープ、認可エントリ）
//! - StrKey: Stellarアカウント（`G...`）と秘密シード（`S...`）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /sign-sep-10 (SEP-10 チャレンジトランザクション署名)
// ---------------------------------------------------------------------------

/// /sign-sep-10 リクエスト。
/// SEP-10: クライアントが提示するチャレンジトランザクション。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignTransactionRequest {
    /// Base64エンコードされたXDRトランザクションエンベロープ
    pub transaction: String,
    /// 対象ネットワークのパスフレーズ
    pub network_passphrase: String,
}

/// /sign-sep-10 レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignTransactionResponse {
    /// ドメイン署名を追記したBase64 XDRトランザクションエンベロープ
    pub transaction: String,
    /// 署名に使用したネットワークパスフレーズ（エコーバック）
    pub network_passphrase: String,
}

// ---------------------------------------------------------------------------
// /sign-sep-45 (SEP-45 コントラクト認可エントリ署名)
// ---------------------------------------------------------------------------

/// /sign-sep-45 リクエスト。
/// SEP-45: アドレス credentials を持つSoroban認可エントリ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignAuthorizationEntryRequest {
    /// Base64エンコードされたXDR認可エントリ（単一エントリのみ）
    pub authorization_entry: String,
    /// 対象ネットワークのパスフレーズ
    pub network_passphrase: String,
}

/// /sign-sep-45 レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignAuthorizationEntryResponse {
    /// 署名と有効期限レジャーを設定したBase64 XDR認可エントリ
    pub authorization_entry: String,
    /// 署名に使用したネットワークパスフレーズ（エコーバック）
    pub network_passphrase: String,
}

// ---------------------------------------------------------------------------
// 共通レスポンス
// ---------------------------------------------------------------------------

/// /health レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 常に "ok"
    pub status: String,
}

/// エラーレスポンスの共通形。全エラーは `{"error": "<message>"}` で返す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// クライアント向けエラーメッセージ
    pub error: String,
}
