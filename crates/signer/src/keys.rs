//! # 署名鍵ペア
//!
//! StrKey秘密シード（`S...`）からのEd25519鍵ペア導出。
//! 秘密シードはプロセス設定のみが保持し、ログにもレスポンスにも出さない。

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};

use crate::error::SignerError;

/// ドメインが保持するEd25519鍵ペア。
#[derive(Debug)]
pub struct Keypair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Keypair {
    /// StrKey秘密シード（`S...`）から鍵ペアを導出する。
    /// 公開鍵（`G...`）やその他の文字列は`InvalidInput`で拒否する。
    pub fn from_secret_seed(seed: &str) -> Result<Self, SignerError> {
        let secret = stellar_strkey::ed25519::PrivateKey::from_string(seed).map_err(|e| {
            SignerError::InvalidInput(format!("failed to parse secret key: {e:?}"))
        })?;
        let signing_key = SigningKey::from_bytes(&secret.0);
        let verifying_key = signing_key.verifying_key();
        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    /// StrKeyアカウントID（`G...`）。
    pub fn account_id(&self) -> String {
        stellar_strkey::ed25519::PublicKey(self.verifying_key.to_bytes()).to_string()
    }

    /// 公開鍵の生バイト列（32バイト）。
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// DecoratedSignatureのヒント（公開鍵の末尾4バイト）。
    pub fn signature_hint(&self) -> [u8; 4] {
        let pk = self.verifying_key.to_bytes();
        [pk[28], pk[29], pk[30], pk[31]]
    }

    /// メッセージ（通常は32バイトのハッシュ）へのEd25519署名。
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// 検証用公開鍵。
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}
