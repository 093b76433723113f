//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO network or storage dependencies (serde and hex decoding only).

mod error;
mod address;
mod network;
mod package;
mod todo;
mod mutation;

pub use error::{DomainError, DomainResult};
pub use address::{ObjectId, SuiAddress, TransactionDigest};
pub use network::Network;
pub use package::{
    resolve_package_id, PackageSource, ResolvedPackage, StructTag, DEFAULT_PACKAGE_ID,
    TODO_MODULE, TODO_STRUCT,
};
pub use todo::{normalize_text, Todo, MAX_TEXT_LEN};
pub use mutation::{
    CallArg, MoveCall, MutationEvent, MutationIntent, MutationKind, MutationPhase, PendingTarget,
    TransitionError,
};
