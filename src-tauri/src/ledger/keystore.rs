//! Keystore Wallet
//!
//! Signs with an Ed25519 key from a Sui CLI keystore file
//! (`~/.sui/sui_config/sui.keystore`): a JSON array of base64 strings, each
//! `flag || 32-byte secret`. Transactions are built by the fullnode, signed
//! here over the intent digest, then submitted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};

use super::rpc::SuiRpcClient;
use super::{LedgerError, LedgerResult, Wallet};
use crate::domain::{MoveCall, SuiAddress, TransactionDigest};

type Blake2b256 = Blake2b<U32>;

/// Signature scheme flag for Ed25519
pub const ED25519_FLAG: u8 = 0x00;

/// Intent prefix for transaction data: scope TransactionData, version V0, app Sui
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

fn blake2b256(chunks: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Digest that gets signed for a transaction
pub fn intent_digest(tx_bytes: &[u8]) -> [u8; 32] {
    blake2b256(&[&TRANSACTION_INTENT[..], tx_bytes])
}

pub struct Keypair {
    signing: SigningKey,
}

impl Keypair {
    pub fn from_secret(secret: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(&secret),
        }
    }

    /// Decode one keystore entry.
    ///
    /// Returns `Ok(None)` for schemes other than Ed25519.
    pub fn from_keystore_entry(entry: &str) -> LedgerResult<Option<Self>> {
        let raw = STANDARD
            .decode(entry.trim())
            .map_err(|e| LedgerError::Wallet(format!("keystore entry is not base64: {}", e)))?;
        let (flag, secret) = raw
            .split_first()
            .ok_or_else(|| LedgerError::Wallet("empty keystore entry".to_string()))?;
        if *flag != ED25519_FLAG {
            return Ok(None);
        }
        let secret: [u8; 32] = secret.try_into().map_err(|_| {
            LedgerError::Wallet(format!("expected 32-byte secret, found {} bytes", secret.len()))
        })?;
        Ok(Some(Self::from_secret(secret)))
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing.verifying_key().to_bytes()
    }

    /// `blake2b256(flag || public key)`
    pub fn address(&self) -> SuiAddress {
        SuiAddress::new(blake2b256(&[&[ED25519_FLAG][..], &self.public_key()[..]]))
    }

    /// Base64 `flag || signature || public key` over the intent digest
    pub fn sign_transaction(&self, tx_bytes: &[u8]) -> String {
        let signature = self.signing.sign(&intent_digest(tx_bytes));
        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.public_key());
        STANDARD.encode(serialized)
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair").field("address", &self.address()).finish()
    }
}

/// Read every Ed25519 key from a keystore file, in file order
pub fn load_keystore(path: &Path) -> LedgerResult<Vec<Keypair>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Wallet(format!("cannot read {}: {}", path.display(), e)))?;
    let entries: Vec<String> = serde_json::from_str(&content)
        .map_err(|e| LedgerError::Wallet(format!("malformed keystore {}: {}", path.display(), e)))?;

    let mut keys = Vec::new();
    for entry in &entries {
        match Keypair::from_keystore_entry(entry)? {
            Some(key) => keys.push(key),
            None => log::debug!("skipping non-ed25519 keystore entry"),
        }
    }
    Ok(keys)
}

pub struct KeystoreWallet {
    keypair: Keypair,
    client: Arc<SuiRpcClient>,
    gas_budget: u64,
}

impl KeystoreWallet {
    /// Open the keystore and pick `preferred`, or the first Ed25519 key
    pub fn open(
        path: &Path,
        preferred: Option<SuiAddress>,
        client: Arc<SuiRpcClient>,
        gas_budget: u64,
    ) -> LedgerResult<Self> {
        let keys = load_keystore(path)?;
        let keypair = match preferred {
            Some(address) => keys
                .into_iter()
                .find(|k| k.address() == address)
                .ok_or_else(|| {
                    LedgerError::Wallet(format!("no key for {} in {}", address, path.display()))
                })?,
            None => keys.into_iter().next().ok_or_else(|| {
                LedgerError::Wallet(format!("no ed25519 keys in {}", path.display()))
            })?,
        };
        log::info!("wallet opened for {}", keypair.address());
        Ok(Self {
            keypair,
            client,
            gas_budget,
        })
    }

    /// [`KeystoreWallet::open`] on the blocking pool
    pub async fn open_in_background(
        path: PathBuf,
        preferred: Option<SuiAddress>,
        client: Arc<SuiRpcClient>,
        gas_budget: u64,
    ) -> LedgerResult<Self> {
        tokio::task::spawn_blocking(move || Self::open(&path, preferred, client, gas_budget))
            .await
            .map_err(|e| LedgerError::Wallet(format!("keystore task failed: {}", e)))?
    }
}

#[async_trait]
impl Wallet for KeystoreWallet {
    fn address(&self) -> SuiAddress {
        self.keypair.address()
    }

    async fn sign_and_execute(&self, call: &MoveCall) -> LedgerResult<TransactionDigest> {
        let sender = self.address();
        let unsigned = self
            .client
            .unsafe_move_call(&sender, call, self.gas_budget)
            .await?;
        let raw = STANDARD
            .decode(&unsigned.tx_bytes)
            .map_err(|e| LedgerError::Decode(format!("txBytes is not base64: {}", e)))?;
        let signature = self.keypair.sign_transaction(&raw);

        log::info!("executing {} as {}", call.target(), sender);
        self.client
            .execute_transaction_block(&unsigned.tx_bytes, &signature)
            .await?
            .into_digest()
    }
}
