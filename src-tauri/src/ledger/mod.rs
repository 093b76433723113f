//! Ledger Layer
//!
//! Abstractions over the two external collaborators: the fullnode that holds
//! the todo objects, and the wallet that signs transactions against it.
//! Implementations: JSON-RPC over HTTPS, and a local keystore wallet.

mod wire;
mod rpc;
mod keystore;

use async_trait::async_trait;

use crate::domain::{MoveCall, ObjectId, SuiAddress, TransactionDigest};

pub use wire::{ExecuteResponse, NormalizedModule, ObjectPage, TransactionBlockBytes};
pub use rpc::{decode_rpc_response, RpcSettings, SuiRpcClient};
pub use keystore::{intent_digest, load_keystore, Keypair, KeystoreWallet};

/// Common result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors from the fullnode, the transport, or the wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Request never produced a response (DNS, TLS, connection reset, HTTP status)
    Transport(String),
    /// Fullnode answered with a JSON-RPC error object
    Rpc { code: i64, message: String },
    /// Response did not have the expected shape
    Decode(String),
    /// Transaction executed but its effects report failure
    Execution(String),
    /// Gave up waiting
    Timeout(String),
    /// Wallet could not be opened or refused to sign
    Wallet(String),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::Transport(msg) => write!(f, "Network error: {}", msg),
            LedgerError::Rpc { code, message } => write!(f, "RPC error {}: {}", code, message),
            LedgerError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            LedgerError::Execution(msg) => write!(f, "Execution failed: {}", msg),
            LedgerError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            LedgerError::Wallet(msg) => write!(f, "Wallet error: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LedgerError::Decode(e.to_string())
        } else if e.is_timeout() {
            LedgerError::Timeout(e.to_string())
        } else {
            LedgerError::Transport(e.to_string())
        }
    }
}

/// Read access to ledger state
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// One page of objects owned by `owner` whose type is exactly `struct_type`
    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        struct_type: &str,
        cursor: Option<&str>,
    ) -> LedgerResult<ObjectPage>;

    /// Normalized form of `package::module`; errors if either does not exist
    async fn get_normalized_module(
        &self,
        package: &ObjectId,
        module: &str,
    ) -> LedgerResult<NormalizedModule>;

    /// Resolve once the network reports the transaction as final
    async fn wait_for_transaction(&self, digest: &TransactionDigest) -> LedgerResult<()>;
}

/// Signs and submits transactions for one account
#[async_trait]
pub trait Wallet: Send + Sync {
    fn address(&self) -> SuiAddress;

    /// Build, sign and execute a single Move call.
    ///
    /// Returns the digest only when execution succeeded.
    async fn sign_and_execute(&self, call: &MoveCall) -> LedgerResult<TransactionDigest>;
}
