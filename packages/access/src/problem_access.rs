use crate::identity::{CapabilitySet, Viewer, permissions_of};
use crate::problem::Problem;
use crate::roles::{RoleSet, roles_of};
use crate::rules::{EDIT, MANAGE_SUBMISSIONS, ProblemFilter, Rule, VISIBILITY};

/// All three problem decisions for one viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemAccess {
    pub accessible: bool,
    pub editable: bool,
    pub subs_manageable: bool,
}

struct Subject {
    capabilities: CapabilitySet,
    roles: RoleSet,
}

impl Subject {
    fn new(viewer: &Viewer, problem: &Problem) -> Self {
        Self {
            capabilities: permissions_of(viewer),
            roles: roles_of(viewer, problem),
        }
    }

    fn check(&self, rule: &Rule, problem: &Problem) -> bool {
        rule.holds(&self.capabilities, &self.roles, problem)
    }
}

pub fn is_accessible_by(viewer: &Viewer, problem: &Problem) -> bool {
    Subject::new(viewer, problem).check(&VISIBILITY, problem)
}

/// Editing needs either `edit_all`, or an editor role together with
/// `edit_own`. Neither half alone is enough.
pub fn is_editable_by(viewer: &Viewer, problem: &Problem) -> bool {
    Subject::new(viewer, problem).check(&EDIT, problem)
}

/// Rejudging needs `edit_all`, or `rejudge` on top of edit rights.
pub fn is_subs_manageable_by(viewer: &Viewer, problem: &Problem) -> bool {
    Subject::new(viewer, problem).check(&MANAGE_SUBMISSIONS, problem)
}

/// Evaluate every problem decision at once.
pub fn evaluate(viewer: &Viewer, problem: &Problem) -> ProblemAccess {
    let subject = Subject::new(viewer, problem);
    let access = ProblemAccess {
        accessible: subject.check(&VISIBILITY, problem),
        editable: subject.check(&EDIT, problem),
        subs_manageable: subject.check(&MANAGE_SUBMISSIONS, problem),
    };
    tracing::debug!(
        problem = problem.code(),
        viewer = ?viewer.profile_id(),
        accessible = access.accessible,
        editable = access.editable,
        subs_manageable = access.subs_manageable,
        "Evaluated problem access"
    );
    access
}

/// Filter selecting exactly the problems [`is_accessible_by`] accepts.
pub fn get_visible_problems(viewer: &Viewer) -> ProblemFilter {
    VISIBILITY.specialize(viewer, &permissions_of(viewer))
}

/// Filter selecting exactly the problems [`is_editable_by`] accepts.
pub fn get_editable_problems(viewer: &Viewer) -> ProblemFilter {
    EDIT.specialize(viewer, &permissions_of(viewer))
}

/// Filter selecting exactly the problems [`is_subs_manageable_by`] accepts.
pub fn get_subs_manageable_problems(viewer: &Viewer) -> ProblemFilter {
    MANAGE_SUBMISSIONS.specialize(viewer, &permissions_of(viewer))
}
