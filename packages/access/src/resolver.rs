use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::error::{AccessError, Result};
use crate::identity::{ProfileId, Viewer};
use crate::problem::Problem;
use crate::problem_access::{self, ProblemAccess};
use crate::solution;
use crate::store::{IdentityStore, OrganizationStore, ProblemStore, SubmissionStore};
use crate::submission::SubmissionHistory;
use crate::vote::{self, VoteDecision};

/// Loads snapshots from the external stores, then hands them to the pure
/// policy functions.
#[derive(Clone)]
pub struct Resolver {
    identities: Arc<dyn IdentityStore>,
    problems: Arc<dyn ProblemStore>,
    submissions: Arc<dyn SubmissionStore>,
    organizations: Arc<dyn OrganizationStore>,
}

impl Resolver {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        problems: Arc<dyn ProblemStore>,
        submissions: Arc<dyn SubmissionStore>,
        organizations: Arc<dyn OrganizationStore>,
    ) -> Self {
        Self {
            identities,
            problems,
            submissions,
            organizations,
        }
    }

    /// Use one store for every lookup.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: IdentityStore + ProblemStore + SubmissionStore + OrganizationStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// `None` is the anonymous viewer.
    pub async fn viewer(&self, id: Option<ProfileId>) -> Result<Viewer> {
        let Some(id) = id else {
            return Ok(Viewer::Anonymous);
        };
        self.identities
            .profile(id)
            .await?
            .map(Viewer::Authenticated)
            .ok_or_else(|| AccessError::NotFound(format!("Profile {id}")))
    }

    /// Like [`Resolver::viewer`], also resolving which of the problem's
    /// organizations the viewer administers.
    pub async fn viewer_for_problem(
        &self,
        id: Option<ProfileId>,
        problem: &Problem,
    ) -> Result<Viewer> {
        let mut viewer = self.viewer(id).await?;
        if let Viewer::Authenticated(profile) = &mut viewer {
            for organization in problem.organizations() {
                if self
                    .organizations
                    .admins(*organization)
                    .await?
                    .contains(&profile.id)
                {
                    profile.administered_organizations.insert(*organization);
                }
            }
        }
        Ok(viewer)
    }

    pub async fn problem(&self, code: &str) -> Result<Problem> {
        self.problems
            .problem(code)
            .await?
            .ok_or_else(|| AccessError::NotFound(format!("Problem '{code}'")))
    }

    #[instrument(skip(self))]
    pub async fn problem_access(&self, id: Option<ProfileId>, code: &str) -> Result<ProblemAccess> {
        let problem = self.problem(code).await?;
        let viewer = self.viewer_for_problem(id, &problem).await?;
        Ok(problem_access::evaluate(&viewer, &problem))
    }

    #[instrument(skip(self))]
    pub async fn solution_access(&self, id: Option<ProfileId>, code: &str) -> Result<bool> {
        let solution = self
            .problems
            .solution(code)
            .await?
            .ok_or_else(|| AccessError::NotFound(format!("Editorial for '{code}'")))?;
        let viewer = self.viewer(id).await?;
        Ok(solution::is_accessible_at(&viewer, &solution, Utc::now()))
    }

    #[instrument(skip(self))]
    pub async fn vote_permission(&self, id: Option<ProfileId>, code: &str) -> Result<VoteDecision> {
        let problem = self.problem(code).await?;
        let viewer = self.viewer(id).await?;
        let history = match viewer.profile_id() {
            Some(profile) => self.submissions.history(profile, &problem).await?,
            None => SubmissionHistory::unsolved(),
        };
        Ok(vote::decide_vote(&viewer, &problem, &history, Utc::now()))
    }

    #[instrument(skip(self))]
    pub async fn visible_problems(&self, id: Option<ProfileId>) -> Result<Vec<Problem>> {
        let viewer = self.viewer(id).await?;
        let filter = problem_access::get_visible_problems(&viewer);
        let mut problems = self.problems.problems().await?;
        problems.retain(|p| filter.matches(p));
        Ok(problems)
    }

    #[instrument(skip(self))]
    pub async fn editable_problems(&self, id: Option<ProfileId>) -> Result<Vec<Problem>> {
        let viewer = self.viewer(id).await?;
        let filter = problem_access::get_editable_problems(&viewer);
        let mut problems = self.problems.problems().await?;
        problems.retain(|p| filter.matches(p));
        Ok(problems)
    }
}
