use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ProfileId = i32;
pub type ProblemId = i32;
pub type OrganizationId = i32;
pub type ContestId = i32;

/// A user's current contest attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestParticipation {
    pub contest: ContestId,
    /// `None` for contests without an end time.
    pub ends_at: Option<DateTime<Utc>>,
}

impl ContestParticipation {
    /// Whether the participation is still running at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.is_none_or(|end| now < end)
    }
}

/// Read-only snapshot of an authenticated user's profile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub username: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub is_unlisted: bool,
    pub is_banned_from_problem_voting: bool,
    /// Granted global permission names, e.g. `problem:edit_own`.
    pub permissions: BTreeSet<String>,
    pub organizations: BTreeSet<OrganizationId>,
    /// Organizations this user administers, as far as the resolver looked.
    pub administered_organizations: BTreeSet<OrganizationId>,
    pub current_contest: Option<ContestParticipation>,
}

impl Profile {
    pub fn new(id: ProfileId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_permissions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_capabilities(mut self, capabilities: &[Capability]) -> Self {
        self.permissions
            .extend(capabilities.iter().map(|c| c.as_str().to_string()));
        self
    }

    pub fn with_organizations(mut self, organizations: &[OrganizationId]) -> Self {
        self.organizations.extend(organizations.iter().copied());
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self.is_staff = true;
        self
    }
}

/// The party a decision is made for.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Viewer {
    #[default]
    Anonymous,
    Authenticated(Profile),
}

impl Viewer {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Authenticated(profile) => Some(profile),
        }
    }

    pub fn profile_id(&self) -> Option<ProfileId> {
        self.profile().map(|p| p.id)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Viewer::Authenticated(_))
    }
}

impl From<Profile> for Viewer {
    fn from(profile: Profile) -> Self {
        Viewer::Authenticated(profile)
    }
}

/// A globally granted capability, independent of any object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Edit every problem.
    EditAll,
    /// Edit problems the user is an editor of.
    EditOwn,
    /// Edit every public problem (needs `EditOwn` as well).
    EditPublic,
    /// See every problem.
    SeeAll,
    /// See organization-private problems of the user's organizations.
    SeeOrganization,
    /// Rejudge and otherwise manage submissions.
    Rejudge,
    /// See every editorial regardless of publication.
    SeePrivateSolution,
}

impl Capability {
    pub const ALL: &'static [Capability] = &[
        Self::EditAll,
        Self::EditOwn,
        Self::EditPublic,
        Self::SeeAll,
        Self::SeeOrganization,
        Self::Rejudge,
        Self::SeePrivateSolution,
    ];

    /// Permission name as stored by the identity store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditAll => "problem:edit_all",
            Self::EditOwn => "problem:edit_own",
            Self::EditPublic => "problem:edit_public",
            Self::SeeAll => "problem:see_all",
            Self::SeeOrganization => "problem:see_organization",
            Self::Rejudge => "problem:rejudge",
            Self::SeePrivateSolution => "solution:see_private",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCapability(pub String);

impl fmt::Display for UnknownCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown capability '{}'", self.0)
    }
}

impl std::error::Error for UnknownCapability {}

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCapability(s.to_string()))
    }
}

/// The capabilities a viewer holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self(Capability::ALL.iter().copied().collect())
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolve the capabilities a viewer holds.
///
/// Superusers hold every capability; anonymous viewers hold none. Granted
/// names that are not capabilities of this core are skipped.
pub fn permissions_of(viewer: &Viewer) -> CapabilitySet {
    let Some(profile) = viewer.profile() else {
        return CapabilitySet::empty();
    };
    if profile.is_superuser {
        return CapabilitySet::all();
    }
    profile
        .permissions
        .iter()
        .filter_map(|name| match name.parse::<Capability>() {
            Ok(capability) => Some(capability),
            Err(_) => {
                tracing::trace!(profile = profile.id, permission = %name, "Ignoring unknown permission");
                None
            }
        })
        .collect()
}
