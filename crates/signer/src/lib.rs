//! # WebAuth Signer プロトコルコア
//!
//! SEP-10（チャレンジトランザクション署名）とSEP-45（Soroban認可エントリ署名）の
//! 共同署名ロジックを実装する。
//!
//! ## 暗号アルゴリズム
//! | 用途 | アルゴリズム |
//! |------|------------|
//! | 署名 | Ed25519 |
//! | ハッシュ | SHA-256 |
//! | ワイヤ形式 | Stellar XDR (Base64) |
//!
//! 署名は常に「検証 → デコード → （SEP-45はアドレス照合・レジャー取得）→
//! 署名 → 再エンコード」の一方向で進み、どの段階の失敗も呼び出し側へ
//! そのまま返す。リトライはこのクレートでは行わない。

pub mod auth_entry;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod ledger;

pub use error::SignerError;
pub use keys::Keypair;
pub use ledger::{HttpLedgerLookup, LedgerLookup};

use sha2::{Digest, Sha256};

/// SHA-256ハッシュ計算。
pub(crate) fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// ネットワークID（ネットワークパスフレーズのSHA-256）。
/// SEP-10 / SEP-45 の署名ハッシュはこのIDで対象ネットワークに束縛される。
pub fn network_id(network_passphrase: &str) -> [u8; 32] {
    sha256(network_passphrase.as_bytes())
}
