//! Authorization core of the judge.
//!
//! Decides, for a viewer and a problem or editorial, whether the viewer may
//! see it, edit it, manage its submissions, or vote on its quality. Every
//! decision is a pure function over read-only snapshots; [`resolver`] shows
//! how the snapshots are loaded from the external stores.

pub mod error;
pub mod identity;
pub mod problem;
pub mod problem_access;
pub mod resolver;
pub mod roles;
pub mod rules;
pub mod solution;
pub mod store;
pub mod submission;
pub mod validation;
pub mod vote;

#[cfg(feature = "sea-orm")]
pub mod entity;
#[cfg(feature = "sea-orm")]
pub mod query;

pub use error::{AccessError, Result};
pub use identity::{
    Capability, CapabilitySet, ContestParticipation, Profile, Viewer, permissions_of,
};
pub use problem::Problem;
pub use problem_access::{
    ProblemAccess, get_editable_problems, get_subs_manageable_problems, get_visible_problems,
};
pub use resolver::Resolver;
pub use roles::{Role, RoleSet, roles_of};
pub use rules::ProblemFilter;
pub use solution::Solution;
pub use submission::{SubmissionHistory, SubmissionRecord};
pub use validation::{ProblemStatementValidator, find_disallowed_characters, validate_statement};
pub use vote::{VoteDecision, VotePermission, VoteReason, decide_vote, vote_permission_for_user};
