//! Service Layer
//!
//! Todo projection, module check, mutation dispatch, and the session that ties
//! them to one network, package and account.

mod projection;
mod module_check;
mod dispatcher;
mod session;

#[cfg(test)]
mod fakes;
#[cfg(test)]
mod tests;

pub use projection::{project_object, project_objects, Projection, SkipReason, TodoQuery};
pub use module_check::{check_todo_module, evaluate_module, ModuleStatus, REQUIRED_FUNCTIONS};
pub use dispatcher::{
    DispatchError, MutationDispatcher, MutationOutcome, PendingGuard, PendingSlot,
    PhaseObserver, PhaseReport,
};
pub use session::{Session, SessionInfo};
