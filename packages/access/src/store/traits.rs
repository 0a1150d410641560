use std::collections::BTreeSet;

use async_trait::async_trait;

use super::error::StoreError;
use crate::identity::{OrganizationId, Profile, ProfileId};
use crate::problem::Problem;
use crate::solution::Solution;
use crate::submission::SubmissionHistory;

/// Identity and permission lookups.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn profile(&self, id: ProfileId) -> Result<Option<Profile>, StoreError>;
}

/// Problem and editorial snapshots.
#[async_trait]
pub trait ProblemStore: Send + Sync {
    async fn problem(&self, code: &str) -> Result<Option<Problem>, StoreError>;

    /// Every problem, for list views.
    async fn problems(&self) -> Result<Vec<Problem>, StoreError>;

    /// The editorial of the problem with this code, if any.
    async fn solution(&self, problem_code: &str) -> Result<Option<Solution>, StoreError>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Accepted-submission summary of `profile` on `problem`, judged against
    /// the problem's current points.
    async fn history(
        &self,
        profile: ProfileId,
        problem: &Problem,
    ) -> Result<SubmissionHistory, StoreError>;
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    /// Profiles administering the organization. Empty if it does not exist.
    async fn admins(&self, organization: OrganizationId)
    -> Result<BTreeSet<ProfileId>, StoreError>;
}
