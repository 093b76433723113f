//! Mutation Dispatcher
//!
//! Drives one mutation through `MutationPhase` and owns the session's single
//! pending slot. Success means: executed, final, and the projection re-fetched.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use super::projection::TodoQuery;
use crate::domain::{
    DomainError, MutationEvent, MutationIntent, MutationKind, MutationPhase, ObjectId,
    PendingTarget, Todo, TransactionDigest, TransitionError,
};
use crate::ledger::{LedgerClient, LedgerError, Wallet};

/// Snapshot of a phase change, as sent to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseReport {
    pub target: PendingTarget,
    pub kind: MutationKind,
    pub phase: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

pub trait PhaseObserver: Send + Sync {
    fn on_phase(&self, report: &PhaseReport);
}

/// The session-wide "at most one mutation in flight" marker
#[derive(Debug, Clone, Default)]
pub struct PendingSlot {
    inner: Arc<Mutex<Option<PendingTarget>>>,
}

impl PendingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<PendingTarget>> {
        // Nothing can be left half-written in an Option, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current(&self) -> Option<PendingTarget> {
        *self.lock()
    }

    /// Take the slot for `target`, or report who holds it
    pub fn try_acquire(&self, target: PendingTarget) -> Result<PendingGuard, PendingTarget> {
        let mut slot = self.lock();
        match *slot {
            Some(holder) => Err(holder),
            None => {
                *slot = Some(target);
                Ok(PendingGuard { slot: self.clone() })
            }
        }
    }
}

/// Clears the pending slot when dropped
pub struct PendingGuard {
    slot: PendingSlot,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Rejected before anything was built
    Invalid(DomainError),
    /// Another mutation holds the pending slot
    Busy(PendingTarget),
    Ledger(LedgerError),
    Transition(TransitionError),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::Invalid(e) => write!(f, "{}", e),
            DispatchError::Busy(_) => write!(f, "Another transaction is still pending"),
            DispatchError::Ledger(e) => write!(f, "{}", e),
            DispatchError::Transition(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<DomainError> for DispatchError {
    fn from(e: DomainError) -> Self {
        DispatchError::Invalid(e)
    }
}

impl From<TransitionError> for DispatchError {
    fn from(e: TransitionError) -> Self {
        DispatchError::Transition(e)
    }
}

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    pub digest: TransactionDigest,
    /// Projection re-fetched after finality
    pub todos: Vec<Todo>,
}

#[derive(Clone)]
pub struct MutationDispatcher {
    wallet: Arc<dyn Wallet>,
    client: Arc<dyn LedgerClient>,
    query: TodoQuery,
    package: ObjectId,
    pending: PendingSlot,
    observer: Arc<dyn PhaseObserver>,
}

impl MutationDispatcher {
    pub fn new(
        wallet: Arc<dyn Wallet>,
        client: Arc<dyn LedgerClient>,
        query: TodoQuery,
        package: ObjectId,
        pending: PendingSlot,
        observer: Arc<dyn PhaseObserver>,
    ) -> Self {
        Self {
            wallet,
            client,
            query,
            package,
            pending,
            observer,
        }
    }

    pub fn pending(&self) -> Option<PendingTarget> {
        self.pending.current()
    }

    /// Run one mutation to completion.
    ///
    /// Invalid input and `Busy` are refused before any transaction is built.
    /// On every other path the pending slot is held from submission until just
    /// before the final phase is reported.
    pub async fn dispatch(&self, intent: MutationIntent) -> Result<MutationOutcome, DispatchError> {
        let intent = intent.validated()?;
        let kind = intent.kind();
        let target = intent.target();

        let guard = self.pending.try_acquire(target).map_err(|holder| {
            log::info!("refusing {:?}: {:?} is still pending", kind, holder);
            DispatchError::Busy(holder)
        })?;

        let call = intent.to_move_call(self.package);
        let phase = MutationPhase::Idle.advance(MutationEvent::Submit(intent))?;
        self.report(&phase, kind.loading_message().to_string());

        let digest = match self.wallet.sign_and_execute(&call).await {
            Ok(digest) => digest,
            Err(e) => return Err(self.fail(phase, guard, e)),
        };
        let phase = phase.advance(MutationEvent::Executed(digest.clone()))?;
        self.report(&phase, kind.loading_message().to_string());

        if let Err(e) = self.client.wait_for_transaction(&digest).await {
            return Err(self.fail(phase, guard, e));
        }

        let todos = match self.query.fetch(&self.wallet.address()).await {
            Ok(todos) => todos,
            Err(e) => return Err(self.fail(phase, guard, e)),
        };

        let phase = phase.advance(MutationEvent::Finalized)?;
        drop(guard);
        log::info!("{:?} finalized in {}", kind, digest);
        self.report(&phase, kind.success_message().to_string());

        Ok(MutationOutcome { digest, todos })
    }

    fn fail(&self, phase: MutationPhase, guard: PendingGuard, error: LedgerError) -> DispatchError {
        let kind = phase.intent().map(MutationIntent::kind);
        let phase = match phase.advance(MutationEvent::Rejected(error.to_string())) {
            Ok(failed) => failed,
            Err(e) => return DispatchError::Transition(e),
        };
        drop(guard);
        log::warn!("{:?} failed: {}", kind, error);
        if let Some(kind) = kind {
            self.report(&phase, kind.failure_message(&error.to_string()));
        }
        DispatchError::Ledger(error)
    }

    fn report(&self, phase: &MutationPhase, message: String) {
        let Some(intent) = phase.intent() else {
            return;
        };
        let digest = match phase {
            MutationPhase::AwaitingFinality { digest, .. }
            | MutationPhase::Succeeded { digest, .. } => Some(digest.as_str().to_string()),
            _ => None,
        };
        self.observer.on_phase(&PhaseReport {
            target: intent.target(),
            kind: intent.kind(),
            phase: phase.name(),
            message,
            digest,
        });
    }
}
