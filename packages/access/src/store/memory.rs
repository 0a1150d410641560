use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;

use super::error::StoreError;
use super::traits::{IdentityStore, OrganizationStore, ProblemStore, SubmissionStore};
use crate::identity::{OrganizationId, Profile, ProfileId};
use crate::problem::Problem;
use crate::solution::Solution;
use crate::submission::{SubmissionHistory, SubmissionRecord};

/// In-memory snapshot implementing every store.
///
/// Built up front and never mutated afterwards, so it can be shared between
/// tasks without locking.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    profiles: HashMap<ProfileId, Profile>,
    problems: BTreeMap<String, Problem>,
    solutions: HashMap<String, Solution>,
    submissions: Vec<SubmissionRecord>,
    organization_admins: HashMap<OrganizationId, BTreeSet<ProfileId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.insert(profile.id, profile);
        self
    }

    pub fn with_problem(mut self, problem: Problem) -> Self {
        self.problems.insert(problem.code().to_string(), problem);
        self
    }

    pub fn with_solution(mut self, solution: Solution) -> Self {
        self.solutions
            .insert(solution.problem().code().to_string(), solution);
        self
    }

    pub fn with_submission(mut self, record: SubmissionRecord) -> Self {
        self.submissions.push(record);
        self
    }

    pub fn with_organization_admins(
        mut self,
        organization: OrganizationId,
        admins: impl IntoIterator<Item = ProfileId>,
    ) -> Self {
        self.organization_admins
            .entry(organization)
            .or_default()
            .extend(admins);
        self
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn profile(&self, id: ProfileId) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.get(&id).cloned())
    }
}

#[async_trait]
impl ProblemStore for MemoryStore {
    async fn problem(&self, code: &str) -> Result<Option<Problem>, StoreError> {
        Ok(self.problems.get(code).cloned())
    }

    async fn problems(&self) -> Result<Vec<Problem>, StoreError> {
        Ok(self.problems.values().cloned().collect())
    }

    async fn solution(&self, problem_code: &str) -> Result<Option<Solution>, StoreError> {
        Ok(self.solutions.get(problem_code).cloned())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn history(
        &self,
        profile: ProfileId,
        problem: &Problem,
    ) -> Result<SubmissionHistory, StoreError> {
        Ok(SubmissionHistory::from_records(
            &self.submissions,
            profile,
            problem,
        ))
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn admins(
        &self,
        organization: OrganizationId,
    ) -> Result<BTreeSet<ProfileId>, StoreError> {
        Ok(self
            .organization_admins
            .get(&organization)
            .cloned()
            .unwrap_or_default())
    }
}
