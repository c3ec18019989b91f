//! # SEP-45 認可エントリ署名
//!
//! SEP-45: Soroban認可エントリ（アドレスcredentials）にドメイン保持鍵で
//! 署名する。エントリのアドレスが署名鍵のアカウントと一致しない限り
//! 決して署名しない。署名有効期限は「現在レジャー + 10」の固定窓。

use stellar_xdr::curr::{
    AccountId, Hash, HashIdPreimage, HashIdPreimageSorobanAuthorization, Limits,
    PublicKey as XdrPublicKey, ReadXdr, ScAddress, ScBytes, ScMap, ScMapEntry, ScSymbol, ScVal,
    ScVec, SorobanAddressCredentials, SorobanAuthorizationEntry, SorobanCredentials, Uint256,
    WriteXdr,
};

use crate::error::SignerError;
use crate::keys::Keypair;
use crate::ledger::LedgerLookup;
use crate::{network_id, sha256};

/// 署名有効期限の窓（レジャー数）。プロトコル定数であり設定では変えない。
pub const SIGNATURE_EXPIRATION_LEDGERS: u32 = 10;

/// 認可エントリに署名する。
///
/// 1. 空フィールドの拒否
/// 2. 秘密シードから鍵ペアを導出
/// 3. Base64 XDRエントリをデコード（単一エントリのみ。余剰バイトはデコード失敗）
/// 4. アドレスcredentials必須
/// 5. エントリのアドレス == 署名鍵のアカウントID
/// 6. 最新レジャー取得（失敗は`Rpc`として伝播、既定値にしない）
/// 7. `signature_expiration_ledger = 現在レジャー + 10`
/// 8. Soroban認可プリイメージをハッシュして署名、署名値を埋め込む
/// 9. Base64 XDRへ再エンコード
pub async fn sign_authorization_entry(
    entry_b64: &str,
    network_passphrase: &str,
    secret_seed: &str,
    rpc_url: &str,
    ledger: &dyn LedgerLookup,
) -> Result<String, SignerError> {
    if entry_b64.is_empty() {
        return Err(SignerError::InvalidInput(
            "authorization entry cannot be empty".to_string(),
        ));
    }
    if network_passphrase.is_empty() {
        return Err(SignerError::InvalidInput(
            "network passphrase cannot be empty".to_string(),
        ));
    }
    if secret_seed.is_empty() {
        return Err(SignerError::InvalidInput(
            "secret key cannot be empty".to_string(),
        ));
    }
    if rpc_url.is_empty() {
        return Err(SignerError::InvalidInput(
            "rpc url cannot be empty".to_string(),
        ));
    }

    let keypair = Keypair::from_secret_seed(secret_seed)?;

    let mut entry = SorobanAuthorizationEntry::from_xdr_base64(entry_b64, Limits::none())
        .map_err(|e| {
            SignerError::InvalidInput(format!("failed to decode authorization entry: {e}"))
        })?;

    let SorobanAuthorizationEntry {
        credentials,
        root_invocation,
    } = &mut entry;

    let creds: &mut SorobanAddressCredentials = match credentials {
        SorobanCredentials::Address(creds) => creds,
        SorobanCredentials::SourceAccount => {
            // ソースアカウントcredentialsには照合すべきアドレスがない
            return Err(SignerError::InvalidInput(
                "entry must use address credentials".to_string(),
            ));
        }
    };

    // 保持していない鍵のアドレスには決して署名しない
    let entry_address = match &creds.address {
        ScAddress::Account(AccountId(XdrPublicKey::PublicKeyTypeEd25519(Uint256(bytes)))) => {
            stellar_strkey::ed25519::PublicKey(*bytes).to_string()
        }
        _ => {
            return Err(SignerError::InvalidInput(
                "entry address does not match signing key".to_string(),
            ));
        }
    };
    if entry_address != keypair.account_id() {
        return Err(SignerError::InvalidInput(
            "entry address does not match signing key".to_string(),
        ));
    }

    let current_ledger = ledger.latest_ledger(rpc_url).await?;
    creds.signature_expiration_ledger = current_ledger + SIGNATURE_EXPIRATION_LEDGERS;

    // ネットワークID・nonce・有効期限・ルート呼び出しに署名を束縛する
    let preimage = HashIdPreimage::SorobanAuthorization(HashIdPreimageSorobanAuthorization {
        network_id: Hash(network_id(network_passphrase)),
        nonce: creds.nonce,
        signature_expiration_ledger: creds.signature_expiration_ledger,
        invocation: root_invocation.clone(),
    });
    let preimage_xdr = preimage
        .to_xdr(Limits::none())
        .map_err(|e| SignerError::Internal(format!("プリイメージのエンコードに失敗: {e}")))?;

    let signature = keypair.sign(&sha256(&preimage_xdr));
    creds.signature = signature_scval(&keypair.public_key_bytes(), &signature)?;

    entry
        .to_xdr_base64(Limits::none())
        .map_err(|e| SignerError::Internal(format!("認可エントリの再エンコードに失敗: {e}")))
}

/// 署名値のScVal表現を構築する。
/// `[{public_key: Bytes, signature: Bytes}]` の1要素ベクタ。
fn signature_scval(public_key: &[u8; 32], signature: &[u8; 64]) -> Result<ScVal, SignerError> {
    let internal =
        |e: stellar_xdr::curr::Error| SignerError::Internal(format!("署名ScValの構築に失敗: {e}"));

    let entries = vec![
        ScMapEntry {
            key: ScVal::Symbol(ScSymbol("public_key".try_into().map_err(internal)?)),
            val: ScVal::Bytes(ScBytes(public_key.to_vec().try_into().map_err(internal)?)),
        },
        ScMapEntry {
            key: ScVal::Symbol(ScSymbol("signature".try_into().map_err(internal)?)),
            val: ScVal::Bytes(ScBytes(signature.to_vec().try_into().map_err(internal)?)),
        },
    ];
    let map = ScMap(entries.try_into().map_err(internal)?);
    let vec = ScVec(vec![ScVal::Map(Some(map))].try_into().map_err(internal)?);
    Ok(ScVal::Vec(Some(vec)))
}
