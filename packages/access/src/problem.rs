use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{AccessError, Result};
use crate::identity::{OrganizationId, ProblemId, ProfileId};

/// Longest accepted problem code.
pub const MAX_CODE_LENGTH: usize = 20;

/// Validated, immutable snapshot of a problem and its relations.
///
/// Only constructible through [`Problem::builder`], which rejects malformed
/// codes and point values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Problem {
    id: ProblemId,
    code: String,
    name: String,
    points: f64,
    is_public: bool,
    is_organization_private: bool,
    authors: Vec<ProfileId>,
    curators: Vec<ProfileId>,
    testers: Vec<ProfileId>,
    organizations: BTreeSet<OrganizationId>,
    banned_users: BTreeSet<ProfileId>,
}

impl Problem {
    pub fn builder(id: ProblemId, code: impl Into<String>, points: f64) -> ProblemBuilder {
        ProblemBuilder {
            problem: Problem {
                id,
                code: code.into(),
                name: String::new(),
                points,
                is_public: false,
                is_organization_private: false,
                authors: Vec::new(),
                curators: Vec::new(),
                testers: Vec::new(),
                organizations: BTreeSet::new(),
                banned_users: BTreeSet::new(),
            },
        }
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full score, exactly as stored.
    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_organization_private(&self) -> bool {
        self.is_organization_private
    }

    pub fn authors(&self) -> &[ProfileId] {
        &self.authors
    }

    pub fn curators(&self) -> &[ProfileId] {
        &self.curators
    }

    pub fn testers(&self) -> &[ProfileId] {
        &self.testers
    }

    pub fn organizations(&self) -> &BTreeSet<OrganizationId> {
        &self.organizations
    }

    pub fn banned_users(&self) -> &BTreeSet<ProfileId> {
        &self.banned_users
    }

    /// Authors followed by curators, without duplicates.
    pub fn editor_ids(&self) -> Vec<ProfileId> {
        let mut ids = self.authors.clone();
        for id in &self.curators {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    pub fn is_editor(&self, profile: ProfileId) -> bool {
        self.authors.contains(&profile) || self.curators.contains(&profile)
    }
}

pub struct ProblemBuilder {
    problem: Problem,
}

impl ProblemBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.problem.name = name.into();
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.problem.is_public = is_public;
        self
    }

    pub fn organization_private(mut self, is_organization_private: bool) -> Self {
        self.problem.is_organization_private = is_organization_private;
        self
    }

    pub fn authors(mut self, ids: impl IntoIterator<Item = ProfileId>) -> Self {
        extend_unique(&mut self.problem.authors, ids);
        self
    }

    pub fn curators(mut self, ids: impl IntoIterator<Item = ProfileId>) -> Self {
        extend_unique(&mut self.problem.curators, ids);
        self
    }

    pub fn testers(mut self, ids: impl IntoIterator<Item = ProfileId>) -> Self {
        extend_unique(&mut self.problem.testers, ids);
        self
    }

    pub fn organizations(mut self, ids: impl IntoIterator<Item = OrganizationId>) -> Self {
        self.problem.organizations.extend(ids);
        self
    }

    pub fn banned_users(mut self, ids: impl IntoIterator<Item = ProfileId>) -> Self {
        self.problem.banned_users.extend(ids);
        self
    }

    pub fn build(self) -> Result<Problem> {
        let problem = self.problem;
        validate_code(&problem.code)?;
        if !problem.points.is_finite() || problem.points < 0.0 {
            return Err(AccessError::Malformed(format!(
                "problem '{}' has invalid points {}",
                problem.code, problem.points
            )));
        }
        if problem.name.is_empty() {
            return Ok(Problem {
                name: problem.code.clone(),
                ..problem
            });
        }
        Ok(problem)
    }
}

fn extend_unique(target: &mut Vec<ProfileId>, ids: impl IntoIterator<Item = ProfileId>) {
    for id in ids {
        if !target.contains(&id) {
            target.push(id);
        }
    }
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(AccessError::Malformed(format!(
            "problem code must be 1-{MAX_CODE_LENGTH} characters, got '{code}'"
        )));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(AccessError::Malformed(format!(
            "problem code '{code}' may only contain a-z and 0-9"
        )));
    }
    Ok(())
}
