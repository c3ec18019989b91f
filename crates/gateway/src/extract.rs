//! # リクエストボディ検証ヘルパー

use webauth_signer::SignerError;

use crate::error::GatewayError;

/// JSONボディから必須の文字列フィールドを取り出す。
/// 欠落・文字列以外は署名処理に入る前に
/// `400 {"error":"missing <field> parameter"}` で拒否する。
pub fn require_str<'a>(
    body: &'a serde_json::Value,
    field: &str,
) -> Result<&'a str, GatewayError> {
    body.get(field)
        .and_then(|value| value.as_str())
        .ok_or_else(|| SignerError::InvalidInput(format!("missing {field} parameter")).into())
}
