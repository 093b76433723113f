//! Session
//!
//! Everything fixed when the app (re)loads: network, package, fullnode client,
//! and optionally a connected account with its dispatcher. Reconnecting or
//! reloading builds a new session, which also discards any pending marker.

use std::sync::Arc;

use serde::Serialize;

use super::dispatcher::{
    DispatchError, MutationDispatcher, MutationOutcome, PendingSlot, PhaseObserver,
};
use super::module_check::{check_todo_module, ModuleStatus};
use super::projection::TodoQuery;
use crate::domain::{
    MutationIntent, Network, PackageSource, PendingTarget, ResolvedPackage, SuiAddress, Todo,
};
use crate::ledger::{LedgerClient, LedgerError, LedgerResult, Wallet};

/// What the UI needs to render the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub network: Network,
    pub rpc_url: String,
    pub package_id: String,
    pub package_source: PackageSource,
    pub address: Option<String>,
    pub short_address: Option<String>,
    pub pending: Option<PendingTarget>,
}

struct Account {
    wallet: Arc<dyn Wallet>,
    dispatcher: MutationDispatcher,
}

pub struct Session {
    network: Network,
    rpc_url: String,
    package: ResolvedPackage,
    client: Arc<dyn LedgerClient>,
    query: TodoQuery,
    account: Option<Account>,
}

impl Session {
    /// A session with no account connected
    pub fn new(
        network: Network,
        rpc_url: impl Into<String>,
        package: ResolvedPackage,
        client: Arc<dyn LedgerClient>,
    ) -> Self {
        let query = TodoQuery::new(client.clone(), package);
        Self {
            network,
            rpc_url: rpc_url.into(),
            package,
            client,
            query,
            account: None,
        }
    }

    /// Same network and package, with `wallet` as the account and a fresh pending slot
    pub fn connected(&self, wallet: Arc<dyn Wallet>, observer: Arc<dyn PhaseObserver>) -> Self {
        let dispatcher = MutationDispatcher::new(
            wallet.clone(),
            self.client.clone(),
            self.query.clone(),
            self.package.id,
            PendingSlot::new(),
            observer,
        );
        Self {
            network: self.network,
            rpc_url: self.rpc_url.clone(),
            package: self.package,
            client: self.client.clone(),
            query: self.query.clone(),
            account: Some(Account { wallet, dispatcher }),
        }
    }

    pub fn disconnected(&self) -> Self {
        Self::new(self.network, self.rpc_url.clone(), self.package, self.client.clone())
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn package(&self) -> &ResolvedPackage {
        &self.package
    }

    pub fn address(&self) -> Option<SuiAddress> {
        self.account.as_ref().map(|a| a.wallet.address())
    }

    pub fn pending(&self) -> Option<PendingTarget> {
        self.account.as_ref().and_then(|a| a.dispatcher.pending())
    }

    pub fn info(&self) -> SessionInfo {
        let address = self.address();
        SessionInfo {
            network: self.network,
            rpc_url: self.rpc_url.clone(),
            package_id: self.package.id.to_hex(),
            package_source: self.package.source,
            address: address.map(|a| a.to_hex()),
            short_address: address.map(|a| a.short()),
            pending: self.pending(),
        }
    }

    /// Todos of the connected account; empty when nobody is connected
    pub async fn list_todos(&self) -> LedgerResult<Vec<Todo>> {
        match self.address() {
            Some(owner) => self.query.fetch(&owner).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn check_module(&self) -> ModuleStatus {
        check_todo_module(self.client.as_ref(), &self.package.id).await
    }

    pub async fn dispatch(&self, intent: MutationIntent) -> Result<MutationOutcome, DispatchError> {
        let account = self.account.as_ref().ok_or_else(|| {
            DispatchError::Ledger(LedgerError::Wallet("Please connect your wallet".to_string()))
        })?;
        account.dispatcher.dispatch(intent).await
    }
}
