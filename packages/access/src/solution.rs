use chrono::{DateTime, Utc};

use crate::identity::{Capability, ProfileId, Viewer, permissions_of};
use crate::problem::Problem;
use crate::problem_access;
use crate::roles::roles_of;

/// An editorial for exactly one problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    problem: Problem,
    is_public: bool,
    publish_on: DateTime<Utc>,
    authors: Vec<ProfileId>,
    curators: Vec<ProfileId>,
}

impl Solution {
    pub fn new(problem: Problem, is_public: bool, publish_on: DateTime<Utc>) -> Self {
        Self {
            problem,
            is_public,
            publish_on,
            authors: Vec::new(),
            curators: Vec::new(),
        }
    }

    pub fn with_authors(mut self, ids: impl IntoIterator<Item = ProfileId>) -> Self {
        self.authors.extend(ids);
        self
    }

    pub fn with_curators(mut self, ids: impl IntoIterator<Item = ProfileId>) -> Self {
        self.curators.extend(ids);
        self
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn publish_on(&self) -> DateTime<Utc> {
        self.publish_on
    }

    /// The editorial's own authors and curators, or the problem's editors
    /// when it has none of its own.
    pub fn editor_ids(&self) -> Vec<ProfileId> {
        if self.authors.is_empty() && self.curators.is_empty() {
            return self.problem.editor_ids();
        }
        let mut ids = self.authors.clone();
        for id in &self.curators {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.is_public && now >= self.publish_on
    }
}

pub fn is_accessible_by(viewer: &Viewer, solution: &Solution) -> bool {
    is_accessible_at(viewer, solution, Utc::now())
}

/// Editorial visibility at `now`.
///
/// Holders of `see_private_solution`, editors of the problem and anyone who
/// may edit the problem bypass the publication gate.
pub fn is_accessible_at(viewer: &Viewer, solution: &Solution, now: DateTime<Utc>) -> bool {
    let problem = solution.problem();
    let path = if permissions_of(viewer).has(Capability::SeePrivateSolution) {
        Some("see_private_solution")
    } else if roles_of(viewer, problem).is_editor() {
        Some("problem_editor")
    } else if problem_access::is_editable_by(viewer, problem) {
        Some("problem_editable")
    } else if solution.is_published_at(now) {
        Some("published")
    } else {
        None
    };

    tracing::debug!(
        problem = problem.code(),
        viewer = ?viewer.profile_id(),
        path = path.unwrap_or("denied"),
        "Evaluated editorial access"
    );
    path.is_some()
}
