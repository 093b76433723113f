//! Mutations
//!
//! The four contract calls a user can trigger, and the lifecycle of one
//! attempt: `Idle → Submitted → AwaitingFinality → {Succeeded, Failed}`.

use serde::{Deserialize, Serialize};

use super::address::{ObjectId, TransactionDigest};
use super::error::DomainResult;
use super::package::TODO_MODULE;
use super::todo::normalize_text;

/// Which contract entry function a mutation calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Create,
    Toggle,
    Update,
    Delete,
}

impl MutationKind {
    pub fn function(&self) -> &'static str {
        match self {
            MutationKind::Create => "create_todo",
            MutationKind::Toggle => "toggle_done",
            MutationKind::Update => "update_text",
            MutationKind::Delete => "delete_todo",
        }
    }

    pub fn loading_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Creating todo...",
            MutationKind::Toggle => "Toggling...",
            MutationKind::Update => "Updating...",
            MutationKind::Delete => "Deleting...",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Create => "Todo created!",
            MutationKind::Toggle | MutationKind::Update => "Todo updated!",
            MutationKind::Delete => "Todo deleted!",
        }
    }

    pub fn failure_message(&self, reason: &str) -> String {
        let verb = match self {
            MutationKind::Create => "Create",
            MutationKind::Toggle => "Toggle",
            MutationKind::Update => "Update",
            MutationKind::Delete => "Delete",
        };
        format!("{} failed: {}", verb, reason)
    }
}

/// What the pending marker points at.
///
/// A create has no object id until the ledger assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PendingTarget {
    New,
    Existing(ObjectId),
}

/// A user request, before it becomes a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationIntent {
    Create { text: String },
    Toggle { id: ObjectId },
    Update { id: ObjectId, text: String },
    Delete { id: ObjectId },
}

impl MutationIntent {
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationIntent::Create { .. } => MutationKind::Create,
            MutationIntent::Toggle { .. } => MutationKind::Toggle,
            MutationIntent::Update { .. } => MutationKind::Update,
            MutationIntent::Delete { .. } => MutationKind::Delete,
        }
    }

    pub fn target(&self) -> PendingTarget {
        match self {
            MutationIntent::Create { .. } => PendingTarget::New,
            MutationIntent::Toggle { id }
            | MutationIntent::Update { id, .. }
            | MutationIntent::Delete { id } => PendingTarget::Existing(*id),
        }
    }

    /// Trim text-carrying intents and reject blank text
    pub fn validated(self) -> DomainResult<Self> {
        Ok(match self {
            MutationIntent::Create { text } => MutationIntent::Create {
                text: normalize_text(&text)?,
            },
            MutationIntent::Update { id, text } => MutationIntent::Update {
                id,
                text: normalize_text(&text)?,
            },
            other => other,
        })
    }

    /// The single Move call this intent becomes
    pub fn to_move_call(&self, package: ObjectId) -> MoveCall {
        let arguments = match self {
            MutationIntent::Create { text } => vec![CallArg::Pure(text.clone())],
            MutationIntent::Toggle { id } | MutationIntent::Delete { id } => {
                vec![CallArg::Object(*id)]
            }
            MutationIntent::Update { id, text } => {
                vec![CallArg::Object(*id), CallArg::Pure(text.clone())]
            }
        };
        MoveCall {
            package,
            module: TODO_MODULE,
            function: self.kind().function(),
            arguments,
        }
    }
}

/// Argument to a Move call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// UTF-8 string passed by value
    Pure(String),
    /// Reference to an object the sender owns
    Object(ObjectId),
}

impl CallArg {
    /// JSON-RPC form: both kinds travel as strings and the fullnode resolves them
    /// against the function signature.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CallArg::Pure(s) => serde_json::Value::String(s.clone()),
            CallArg::Object(id) => serde_json::Value::String(id.to_hex()),
        }
    }
}

/// One `package::module::function(args)` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: &'static str,
    pub function: &'static str,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

/// Inputs that drive a [`MutationPhase`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    /// The intent was handed to the wallet
    Submit(MutationIntent),
    /// The wallet signed and the fullnode executed it
    Executed(TransactionDigest),
    /// The network reported the transaction as final
    Finalized,
    /// Anything went wrong
    Rejected(String),
}

impl MutationEvent {
    fn name(&self) -> &'static str {
        match self {
            MutationEvent::Submit(_) => "submit",
            MutationEvent::Executed(_) => "executed",
            MutationEvent::Finalized => "finalized",
            MutationEvent::Rejected(_) => "rejected",
        }
    }
}

/// Lifecycle of a single mutation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    Submitted {
        intent: MutationIntent,
    },
    AwaitingFinality {
        intent: MutationIntent,
        digest: TransactionDigest,
    },
    Succeeded {
        intent: MutationIntent,
        digest: TransactionDigest,
    },
    Failed {
        intent: MutationIntent,
        reason: String,
    },
}

/// An event arrived in a phase that does not accept it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: &'static str,
    pub event: &'static str,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "illegal transition: {} in phase {}", self.event, self.from)
    }
}

impl std::error::Error for TransitionError {}

impl MutationPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MutationPhase::Idle => "idle",
            MutationPhase::Submitted { .. } => "submitted",
            MutationPhase::AwaitingFinality { .. } => "awaiting-finality",
            MutationPhase::Succeeded { .. } => "succeeded",
            MutationPhase::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationPhase::Succeeded { .. } | MutationPhase::Failed { .. })
    }

    pub fn intent(&self) -> Option<&MutationIntent> {
        match self {
            MutationPhase::Idle => None,
            MutationPhase::Submitted { intent }
            | MutationPhase::AwaitingFinality { intent, .. }
            | MutationPhase::Succeeded { intent, .. }
            | MutationPhase::Failed { intent, .. } => Some(intent),
        }
    }

    /// The only way to move between phases
    pub fn advance(self, event: MutationEvent) -> Result<Self, TransitionError> {
        match (self, event) {
            (MutationPhase::Idle, MutationEvent::Submit(intent)) => {
                Ok(MutationPhase::Submitted { intent })
            }
            (MutationPhase::Submitted { intent }, MutationEvent::Executed(digest)) => {
                Ok(MutationPhase::AwaitingFinality { intent, digest })
            }
            (MutationPhase::AwaitingFinality { intent, digest }, MutationEvent::Finalized) => {
                Ok(MutationPhase::Succeeded { intent, digest })
            }
            (MutationPhase::Submitted { intent }, MutationEvent::Rejected(reason))
            | (MutationPhase::AwaitingFinality { intent, .. }, MutationEvent::Rejected(reason)) => {
                Ok(MutationPhase::Failed { intent, reason })
            }
            (phase, event) => Err(TransitionError {
                from: phase.name(),
                event: event.name(),
            }),
        }
    }
}
