//! Action execution pipeline
//!
//! Converts a classified ActionEnvelope into a store operation:
//! ActionEnvelope -> policy -> resolve_target -> dispatch -> ExecutionOutcome

pub mod dispatcher;
pub mod policy;
pub mod resolver;

pub use dispatcher::{dispatch, ExecutionOutcome};
pub use policy::should_auto_execute;
pub use resolver::resolve_target;
