//! # SEP-10 トランザクションエンベロープ署名
//!
//! SEP-10: クライアントが提示したチャレンジトランザクションに、
//! ドメイン保持鍵の署名を「追記」する。既存の署名は一切置き換えない。
//! 同じ鍵で2回署名すれば署名は2件になる（重複排除しない）。

use stellar_xdr::curr::{
    DecoratedSignature, Hash, Limits, MuxedAccount, Preconditions, ReadXdr, Signature,
    SignatureHint, Transaction, TransactionEnvelope, TransactionExt,
    TransactionSignaturePayload, TransactionSignaturePayloadTaggedTransaction, TransactionV0,
    VecM, WriteXdr,
};

use crate::error::SignerError;
use crate::keys::Keypair;
use crate::{network_id, sha256};

/// チャレンジトランザクションに共同署名する。
///
/// 1. 空フィールドの拒否
/// 2. 秘密シードから鍵ペアを導出
/// 3. Base64 XDRエンベロープをデコード
/// 4. Fee Bumpエンベロープの無条件拒否
/// 5. ネットワーク修飾ハッシュへ署名して署名リストに追記
/// 6. Base64 XDRへ再エンコード
///
/// 手順4まではクライアントの誤り（`InvalidInput`）、以降の失敗は内部エラー。
pub fn sign_transaction(
    tx_b64: &str,
    network_passphrase: &str,
    secret_seed: &str,
) -> Result<String, SignerError> {
    if tx_b64.is_empty() {
        return Err(SignerError::InvalidInput(
            "transaction cannot be empty".to_string(),
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

    let keypair = Keypair::from_secret_seed(secret_seed)?;

    let mut envelope = TransactionEnvelope::from_xdr_base64(tx_b64, Limits::none())
        .map_err(|e| SignerError::InvalidInput(format!("failed to parse transaction XDR: {e}")))?;

    match &mut envelope {
        TransactionEnvelope::TxFeeBump(_) => {
            // Fee Bumpはペイロードの妥当性に関係なく拒否する
            return Err(SignerError::InvalidInput(
                "expected a regular transaction, not a fee bump transaction".to_string(),
            ));
        }
        TransactionEnvelope::Tx(v1) => {
            let decorated = decorated_signature(&v1.tx, network_passphrase, &keypair)?;
            push_signature(&mut v1.signatures, decorated)?;
        }
        TransactionEnvelope::TxV0(v0) => {
            let tx = v0_to_v1(&v0.tx);
            let decorated = decorated_signature(&tx, network_passphrase, &keypair)?;
            push_signature(&mut v0.signatures, decorated)?;
        }
    }

    envelope
        .to_xdr_base64(Limits::none())
        .map_err(|e| SignerError::Internal(format!("エンベロープの再エンコードに失敗: {e}")))
}

/// ネットワーク修飾ハッシュを計算し、DecoratedSignatureを構築する。
fn decorated_signature(
    tx: &Transaction,
    network_passphrase: &str,
    keypair: &Keypair,
) -> Result<DecoratedSignature, SignerError> {
    let payload = TransactionSignaturePayload {
        network_id: Hash(network_id(network_passphrase)),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(tx.clone()),
    };
    let payload_xdr = payload
        .to_xdr(Limits::none())
        .map_err(|e| SignerError::Internal(format!("署名ペイロードのエンコードに失敗: {e}")))?;

    let signature = keypair.sign(&sha256(&payload_xdr));

    Ok(DecoratedSignature {
        hint: SignatureHint(keypair.signature_hint()),
        signature: Signature(
            signature
                .to_vec()
                .try_into()
                .map_err(|e| SignerError::Internal(format!("署名バイト列の変換に失敗: {e}")))?,
        ),
    })
}

/// 既存署名を保ったまま末尾に追記する。XDR上限（20件）超過は内部エラー。
fn push_signature(
    signatures: &mut VecM<DecoratedSignature, 20>,
    decorated: DecoratedSignature,
) -> Result<(), SignerError> {
    let mut list = signatures.to_vec();
    list.push(decorated);
    *signatures = list
        .try_into()
        .map_err(|e| SignerError::Internal(format!("署名リストの再構築に失敗: {e}")))?;
    Ok(())
}

/// レガシーV0トランザクションをV1形式へ変換する。
/// 署名ハッシュはV1形式のペイロードで計算する（各Stellar SDKと同じ挙動）。
fn v0_to_v1(tx: &TransactionV0) -> Transaction {
    Transaction {
        source_account: MuxedAccount::Ed25519(tx.source_account_ed25519.clone()),
        fee: tx.fee,
        seq_num: tx.seq_num.clone(),
        cond: match tx.time_bounds.clone() {
            Some(time_bounds) => Preconditions::Time(time_bounds),
            None => Preconditions::None,
        },
        memo: tx.memo.clone(),
        operations: tx.operations.clone(),
        ext: TransactionExt::V0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::Verifier;
    use stellar_xdr::curr::{
        FeeBumpTransaction, FeeBumpTransactionEnvelope, FeeBumpTransactionExt,
        FeeBumpTransactionInnerTx, Memo, SequenceNumber, TransactionV0Envelope, TransactionV0Ext,
        TransactionV1Envelope, Uint256,
    };

    const TEST_PASSPHRASE: &str = "Test SDF Network ; September 2015";

    fn test_seed() -> String {
        stellar_strkey::ed25519::PrivateKey([7u8; 32]).to_string()
    }

    fn test_tx() -> Transaction {
        Transaction {
            source_account: MuxedAccount::Ed25519(Uint256([1u8; 32])),
            fee: 100,
            seq_num: SequenceNumber(1),
            cond: Preconditions::None,
            memo: Memo::None,
            operations: VecM::default(),
            ext: TransactionExt::V0,
        }
    }

    fn test_envelope() -> String {
        TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: test_tx(),
            signatures: VecM::default(),
        })
        .to_xdr_base64(Limits::none())
        .unwrap()
    }

    fn fee_bump_envelope() -> String {
        let inner = TransactionV1Envelope {
            tx: test_tx(),
            signatures: VecM::default(),
        };
        TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope {
            tx: FeeBumpTransaction {
                fee_source: MuxedAccount::Ed25519(Uint256([2u8; 32])),
                fee: 200,
                inner_tx: FeeBumpTransactionInnerTx::Tx(inner),
                ext: FeeBumpTransactionExt::V0,
            },
            signatures: VecM::default(),
        })
        .to_xdr_base64(Limits::none())
        .unwrap()
    }

    fn decode_signatures(signed_b64: &str) -> Vec<DecoratedSignature> {
        match TransactionEnvelope::from_xdr_base64(signed_b64, Limits::none()).unwrap() {
            TransactionEnvelope::Tx(v1) => v1.signatures.to_vec(),
            TransactionEnvelope::TxV0(v0) => v0.signatures.to_vec(),
            TransactionEnvelope::TxFeeBump(_) => panic!("fee bumpは返らないはず"),
        }
    }

    #[test]
    fn test_sign_appends_one_signature() {
        let signed = sign_transaction(&test_envelope(), TEST_PASSPHRASE, &test_seed()).unwrap();

        let signatures = decode_signatures(&signed);
        assert_eq!(signatures.len(), 1);

        // 署名はネットワーク修飾ハッシュに対して検証できる
        let keypair = Keypair::from_secret_seed(&test_seed()).unwrap();
        let payload = TransactionSignaturePayload {
            network_id: Hash(network_id(TEST_PASSPHRASE)),
            tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(test_tx()),
        };
        let hash = sha256(&payload.to_xdr(Limits::none()).unwrap());
        let sig_bytes: [u8; 64] = signatures[0].signature.0.as_slice().try_into().unwrap();
        let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        assert!(keypair.verifying_key().verify(&hash, &signature).is_ok());
        assert_eq!(signatures[0].hint.0, keypair.signature_hint());
    }

    #[test]
    fn test_signing_twice_yields_two_signatures() {
        let once = sign_transaction(&test_envelope(), TEST_PASSPHRASE, &test_seed()).unwrap();
        let twice = sign_transaction(&once, TEST_PASSPHRASE, &test_seed()).unwrap();

        // 同じ鍵でも置き換えず追記する（単調増加）
        assert_eq!(decode_signatures(&once).len(), 1);
        assert_eq!(decode_signatures(&twice).len(), 2);
    }

    #[test]
    fn test_signs_legacy_v0_envelope() {
        let v0 = TransactionEnvelope::TxV0(TransactionV0Envelope {
            tx: TransactionV0 {
                source_account_ed25519: Uint256([1u8; 32]),
                fee: 100,
                seq_num: SequenceNumber(1),
                time_bounds: None,
                memo: Memo::None,
                operations: VecM::default(),
                ext: TransactionV0Ext::V0,
            },
            signatures: VecM::default(),
        })
        .to_xdr_base64(Limits::none())
        .unwrap();

        let signed = sign_transaction(&v0, TEST_PASSPHRASE, &test_seed()).unwrap();
        assert_eq!(decode_signatures(&signed).len(), 1);
    }

    #[test]
    fn test_rejects_fee_bump_envelope() {
        let err =
            sign_transaction(&fee_bump_envelope(), TEST_PASSPHRASE, &test_seed()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a regular transaction, not a fee bump transaction"
        );
    }

    #[test]
    fn test_rejects_empty_fields() {
        let envelope = test_envelope();
        let seed = test_seed();

        let err = sign_transaction("", TEST_PASSPHRASE, &seed).unwrap_err();
        assert_eq!(err.to_string(), "transaction cannot be empty");

        let err = sign_transaction(&envelope, "", &seed).unwrap_err();
        assert_eq!(err.to_string(), "network passphrase cannot be empty");

        let err = sign_transaction(&envelope, TEST_PASSPHRASE, "").unwrap_err();
        assert_eq!(err.to_string(), "secret key cannot be empty");
    }

    #[test]
    fn test_rejects_malformed_xdr() {
        let err = sign_transaction("not-xdr!!", TEST_PASSPHRASE, &test_seed()).unwrap_err();
        assert!(
            err.to_string().starts_with("failed to parse transaction XDR"),
            "想定外のエラー: {err}"
        );
    }

    #[test]
    fn test_rejects_public_key_as_seed() {
        let keypair = Keypair::from_secret_seed(&test_seed()).unwrap();
        let err =
            sign_transaction(&test_envelope(), TEST_PASSPHRASE, &keypair.account_id()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse secret key"));
    }

    #[test]
    fn test_output_round_trips() {
        let signed = sign_transaction(&test_envelope(), TEST_PASSPHRASE, &test_seed()).unwrap();
        let decoded = TransactionEnvelope::from_xdr_base64(&signed, Limits::none()).unwrap();
        assert_eq!(decoded.to_xdr_base64(Limits::none()).unwrap(), signed);
    }

    #[test]
    fn test_different_passphrases_produce_different_hashes() {
        // 署名対象ハッシュはネットワークに束縛される
        let testnet = sign_transaction(&test_envelope(), TEST_PASSPHRASE, &test_seed()).unwrap();
        let signatures = decode_signatures(&testnet);

        let keypair = Keypair::from_secret_seed(&test_seed()).unwrap();
        let payload = TransactionSignaturePayload {
            network_id: Hash(network_id("Public Global Stellar Network ; September 2015")),
            tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(test_tx()),
        };
        let mainnet_hash = sha256(&payload.to_xdr(Limits::none()).unwrap());
        let sig_bytes: [u8; 64] = signatures[0].signature.0.as_slice().try_into().unwrap();
        let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        assert!(
            keypair
                .verifying_key()
                .verify(&mainnet_hash, &signature)
                .is_err(),
            "別ネットワークのハッシュで検証が通ってはならない"
        );
    }
}
