//! Organization membership check workflow.
//!
//! Extracts the mentioned user from a comment body, looks up their
//! organization membership, classifies the answer, and reports it back to the
//! originating issue thread as a single comment.

pub mod invocation;
pub mod outcome;
pub mod username;
pub mod workflow;

pub use invocation::{ConfigError, InvocationContext, InvocationInputs};
pub use outcome::{classify_lookup, classify_status, MembershipOutcome};
pub use username::{extract_target_username, last_token, MENTION_MARKER};
pub use workflow::{
    run_membership_check, CommentRecord, MembershipApi, WorkflowError, WorkflowReport,
};
