//! Declarative problem rules.
//!
//! Each decision is written once as a [`Rule`]. The per-object check
//! evaluates it against one problem with [`Rule::holds`]; the list views
//! specialize it for one viewer into a [`ProblemFilter`] that can run over a
//! problem collection or be rendered as a storage query. Both come from the
//! same tree, so they agree for every viewer and problem.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::identity::{Capability, CapabilitySet, OrganizationId, ProfileId, Viewer};
use crate::problem::Problem;
use crate::roles::{Role, RoleSet};

/// A per-problem flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Public,
    OrganizationPrivate,
}

impl Flag {
    fn of(self, problem: &Problem) -> bool {
        match self {
            Flag::Public => problem.is_public(),
            Flag::OrganizationPrivate => problem.is_organization_private(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Capability(Capability),
    Role(Role),
    Flag(Flag),
    Not(Box<Rule>),
    All(Vec<Rule>),
    Any(Vec<Rule>),
}

impl Rule {
    /// Evaluate against one problem, given the viewer's capabilities and
    /// roles on it.
    pub fn holds(&self, capabilities: &CapabilitySet, roles: &RoleSet, problem: &Problem) -> bool {
        match self {
            Rule::Capability(capability) => capabilities.has(*capability),
            Rule::Role(role) => roles.has(*role),
            Rule::Flag(flag) => flag.of(problem),
            Rule::Not(rule) => !rule.holds(capabilities, roles, problem),
            Rule::All(rules) => rules.iter().all(|r| r.holds(capabilities, roles, problem)),
            Rule::Any(rules) => rules.iter().any(|r| r.holds(capabilities, roles, problem)),
        }
    }

    /// Fix the viewer-side atoms and keep only problem-side predicates.
    pub fn specialize(&self, viewer: &Viewer, capabilities: &CapabilitySet) -> ProblemFilter {
        match self {
            Rule::Capability(capability) => ProblemFilter::constant(capabilities.has(*capability)),
            Rule::Role(role) => role_filter(*role, viewer),
            Rule::Flag(Flag::Public) => ProblemFilter::IsPublic,
            Rule::Flag(Flag::OrganizationPrivate) => ProblemFilter::IsOrganizationPrivate,
            Rule::Not(rule) => ProblemFilter::not(rule.specialize(viewer, capabilities)),
            Rule::All(rules) => ProblemFilter::and(
                rules
                    .iter()
                    .map(|r| r.specialize(viewer, capabilities))
                    .collect(),
            ),
            Rule::Any(rules) => ProblemFilter::or(
                rules
                    .iter()
                    .map(|r| r.specialize(viewer, capabilities))
                    .collect(),
            ),
        }
    }
}

fn role_filter(role: Role, viewer: &Viewer) -> ProblemFilter {
    let Some(profile) = viewer.profile() else {
        return ProblemFilter::Never;
    };
    match role {
        Role::Author => ProblemFilter::AuthoredBy(profile.id),
        Role::Curator => ProblemFilter::CuratedBy(profile.id),
        Role::Tester => ProblemFilter::TestedBy(profile.id),
        Role::OrganizationMember => ProblemFilter::in_organizations(&profile.organizations),
        Role::OrganizationAdmin => {
            ProblemFilter::in_organizations(&profile.administered_organizations)
        }
    }
}

/// Who may change a problem's content.
pub static EDIT: LazyLock<Rule> = LazyLock::new(|| {
    Rule::Any(vec![
        Rule::Capability(Capability::EditAll),
        Rule::All(vec![
            Rule::Capability(Capability::EditOwn),
            Rule::Any(vec![Rule::Role(Role::Author), Rule::Role(Role::Curator)]),
        ]),
        Rule::All(vec![
            Rule::Capability(Capability::EditOwn),
            Rule::Capability(Capability::EditPublic),
            Rule::Flag(Flag::Public),
        ]),
    ])
});

/// Who may see a problem. Organization admins are deliberately absent.
pub static VISIBILITY: LazyLock<Rule> = LazyLock::new(|| {
    Rule::Any(vec![
        Rule::Capability(Capability::SeeAll),
        Rule::All(vec![
            Rule::Flag(Flag::Public),
            Rule::Any(vec![
                Rule::Not(Box::new(Rule::Flag(Flag::OrganizationPrivate))),
                Rule::Role(Role::OrganizationMember),
            ]),
        ]),
        Rule::All(vec![
            Rule::Flag(Flag::OrganizationPrivate),
            Rule::Role(Role::OrganizationMember),
            Rule::Capability(Capability::SeeOrganization),
        ]),
        Rule::Role(Role::Author),
        Rule::Role(Role::Curator),
        Rule::Role(Role::Tester),
        EDIT.clone(),
    ])
});

/// Who may rejudge or otherwise act on a problem's submissions.
pub static MANAGE_SUBMISSIONS: LazyLock<Rule> = LazyLock::new(|| {
    Rule::Any(vec![
        Rule::Capability(Capability::EditAll),
        Rule::All(vec![Rule::Capability(Capability::Rejudge), EDIT.clone()]),
    ])
});

/// A predicate over problems only, produced by [`Rule::specialize`].
///
/// The constructors fold constants, so a filter is either `Always`, `Never`
/// or contains no constants at all.
#[derive(Clone, Debug, PartialEq)]
pub enum ProblemFilter {
    Always,
    Never,
    IsPublic,
    IsOrganizationPrivate,
    AuthoredBy(ProfileId),
    CuratedBy(ProfileId),
    TestedBy(ProfileId),
    /// Scoped to at least one of these organizations. Never empty.
    InOrganizations(BTreeSet<OrganizationId>),
    Not(Box<ProblemFilter>),
    And(Vec<ProblemFilter>),
    Or(Vec<ProblemFilter>),
}

impl ProblemFilter {
    pub fn constant(value: bool) -> Self {
        if value {
            ProblemFilter::Always
        } else {
            ProblemFilter::Never
        }
    }

    pub fn in_organizations(organizations: &BTreeSet<OrganizationId>) -> Self {
        if organizations.is_empty() {
            ProblemFilter::Never
        } else {
            ProblemFilter::InOrganizations(organizations.clone())
        }
    }

    pub fn not(filter: ProblemFilter) -> Self {
        match filter {
            ProblemFilter::Always => ProblemFilter::Never,
            ProblemFilter::Never => ProblemFilter::Always,
            ProblemFilter::Not(inner) => *inner,
            other => ProblemFilter::Not(Box::new(other)),
        }
    }

    pub fn and(parts: Vec<ProblemFilter>) -> Self {
        let mut kept = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                ProblemFilter::Always => {}
                ProblemFilter::Never => return ProblemFilter::Never,
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => ProblemFilter::Always,
            1 => kept.remove(0),
            _ => ProblemFilter::And(kept),
        }
    }

    pub fn or(parts: Vec<ProblemFilter>) -> Self {
        let mut kept = Vec::with_capacity(parts.len());
        for part in parts {
            match part {
                ProblemFilter::Never => {}
                ProblemFilter::Always => return ProblemFilter::Always,
                other => kept.push(other),
            }
        }
        match kept.len() {
            0 => ProblemFilter::Never,
            1 => kept.remove(0),
            _ => ProblemFilter::Or(kept),
        }
    }

    pub fn matches(&self, problem: &Problem) -> bool {
        match self {
            ProblemFilter::Always => true,
            ProblemFilter::Never => false,
            ProblemFilter::IsPublic => problem.is_public(),
            ProblemFilter::IsOrganizationPrivate => problem.is_organization_private(),
            ProblemFilter::AuthoredBy(id) => problem.authors().contains(id),
            ProblemFilter::CuratedBy(id) => problem.curators().contains(id),
            ProblemFilter::TestedBy(id) => problem.testers().contains(id),
            ProblemFilter::InOrganizations(ids) => !ids.is_disjoint(problem.organizations()),
            ProblemFilter::Not(inner) => !inner.matches(problem),
            ProblemFilter::And(parts) => parts.iter().all(|p| p.matches(problem)),
            ProblemFilter::Or(parts) => parts.iter().any(|p| p.matches(problem)),
        }
    }

    /// Keep the problems this filter selects, in input order.
    pub fn select<'a, I>(&self, problems: I) -> Vec<&'a Problem>
    where
        I: IntoIterator<Item = &'a Problem>,
    {
        problems.into_iter().filter(|p| self.matches(p)).collect()
    }
}
