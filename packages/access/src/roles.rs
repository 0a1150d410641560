use std::collections::BTreeSet;

use crate::identity::Viewer;
use crate::problem::Problem;

/// A per-object role a user may hold on a problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Author,
    Curator,
    Tester,
    OrganizationMember,
    /// Computed for callers, but granted nothing by any rule.
    OrganizationAdmin,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn has(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Author or curator.
    pub fn is_editor(&self) -> bool {
        self.has(Role::Author) || self.has(Role::Curator)
    }

    /// Author, curator or tester.
    pub fn can_view_unpublished(&self) -> bool {
        self.is_editor() || self.has(Role::Tester)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Roles `viewer` holds on `problem`. Anonymous viewers hold none.
pub fn roles_of(viewer: &Viewer, problem: &Problem) -> RoleSet {
    let Some(profile) = viewer.profile() else {
        return RoleSet::default();
    };

    let checks = [
        (Role::Author, problem.authors().contains(&profile.id)),
        (Role::Curator, problem.curators().contains(&profile.id)),
        (Role::Tester, problem.testers().contains(&profile.id)),
        (
            Role::OrganizationMember,
            !profile.organizations.is_disjoint(problem.organizations()),
        ),
        (
            Role::OrganizationAdmin,
            !profile
                .administered_organizations
                .is_disjoint(problem.organizations()),
        ),
    ];
    checks
        .into_iter()
        .filter_map(|(role, held)| held.then_some(role))
        .collect()
}
