use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Viewer;
use crate::problem::Problem;
use crate::submission::SubmissionHistory;

/// What a user may do with a problem's quality votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotePermission {
    None,
    View,
    Vote,
}

impl VotePermission {
    pub fn can_view(&self) -> bool {
        matches!(self, Self::View | Self::Vote)
    }

    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Vote)
    }
}

/// The gate that decided a [`VotePermission`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteReason {
    Anonymous,
    InLiveContest,
    Unsolved,
    BannedGlobally,
    Unlisted,
    BannedFromProblem,
    PartialCredit,
    Eligible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteDecision {
    pub permission: VotePermission,
    pub reason: VoteReason,
}

impl VoteDecision {
    fn new(permission: VotePermission, reason: VoteReason) -> Self {
        Self { permission, reason }
    }
}

pub fn vote_permission_for_user(
    viewer: &Viewer,
    problem: &Problem,
    history: &SubmissionHistory,
) -> VotePermission {
    decide_vote(viewer, problem, history, Utc::now()).permission
}

/// Classify voting rights at `now`. The first matching gate wins:
///
/// 1. anonymous: none
/// 2. in a live contest: none
/// 3. no accepted submission: none
/// 4. banned, unlisted, or only partial credit: view
/// 5. otherwise: vote
pub fn decide_vote(
    viewer: &Viewer,
    problem: &Problem,
    history: &SubmissionHistory,
    now: DateTime<Utc>,
) -> VoteDecision {
    let decision = gate(viewer, problem, history, now);
    tracing::debug!(
        problem = problem.code(),
        viewer = ?viewer.profile_id(),
        permission = ?decision.permission,
        reason = ?decision.reason,
        "Evaluated vote permission"
    );
    decision
}

fn gate(
    viewer: &Viewer,
    problem: &Problem,
    history: &SubmissionHistory,
    now: DateTime<Utc>,
) -> VoteDecision {
    let Some(profile) = viewer.profile() else {
        return VoteDecision::new(VotePermission::None, VoteReason::Anonymous);
    };

    if profile
        .current_contest
        .as_ref()
        .is_some_and(|participation| participation.is_live_at(now))
    {
        return VoteDecision::new(VotePermission::None, VoteReason::InLiveContest);
    }

    if !history.has_accepted() {
        return VoteDecision::new(VotePermission::None, VoteReason::Unsolved);
    }

    if profile.is_banned_from_problem_voting {
        return VoteDecision::new(VotePermission::View, VoteReason::BannedGlobally);
    }
    if profile.is_unlisted {
        return VoteDecision::new(VotePermission::View, VoteReason::Unlisted);
    }
    if problem.banned_users().contains(&profile.id) {
        return VoteDecision::new(VotePermission::View, VoteReason::BannedFromProblem);
    }
    if !history.has_full_score {
        return VoteDecision::new(VotePermission::View, VoteReason::PartialCredit);
    }

    VoteDecision::new(VotePermission::Vote, VoteReason::Eligible)
}
