#![allow(dead_code)]

use std::collections::BTreeMap;

use access::identity::{Capability, OrganizationId, Profile, ProfileId};
use access::{Problem, Solution, Viewer};
use chrono::{DateTime, Duration, TimeZone, Utc};

pub const OPEN_ORG: OrganizationId = 1;
pub const PROBLEM_ORG: OrganizationId = 2;

pub const SUPERUSER: ProfileId = 1;
pub const EDIT_OWN: ProfileId = 2;
pub const SEE_ALL: ProfileId = 3;
pub const EDIT_ALL: ProfileId = 4;
pub const EDIT_PUBLIC: ProfileId = 5;
pub const SEE_ORGANIZATION: ProfileId = 6;
pub const EDIT_ALL_WITH_REJUDGE: ProfileId = 7;
pub const EDIT_OWN_NO_STAFF: ProfileId = 8;
pub const ORGANIZATION_ADMIN: ProfileId = 9;
pub const NORMAL: ProfileId = 10;
pub const SOLUTION_SEE_ALL: ProfileId = 11;

/// Fixed "now" so publication checks are reproducible.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap()
}

fn staff(id: ProfileId, name: &str, capabilities: &[Capability]) -> Profile {
    let mut profile = Profile::new(id, name).with_capabilities(capabilities);
    profile.is_staff = true;
    profile
}

/// Every fixture account by name, plus `anonymous`.
pub fn users() -> BTreeMap<&'static str, Viewer> {
    let mut see_organization = staff(
        SEE_ORGANIZATION,
        "staff_problem_see_organization",
        &[Capability::SeeOrganization],
    );
    see_organization.organizations.insert(OPEN_ORG);

    let mut organization_admin = staff(ORGANIZATION_ADMIN, "staff_organization_admin", &[]);
    organization_admin.administered_organizations.insert(PROBLEM_ORG);

    let mut edit_public = staff(
        EDIT_PUBLIC,
        "staff_problem_edit_public",
        &[Capability::EditOwn, Capability::EditPublic],
    );
    edit_public.administered_organizations.insert(PROBLEM_ORG);

    let mut normal = Profile::new(NORMAL, "normal").with_organizations(&[OPEN_ORG]);
    normal.administered_organizations.insert(PROBLEM_ORG);

    let profiles = [
        ("superuser", Profile::new(SUPERUSER, "superuser").superuser()),
        (
            "staff_problem_edit_own",
            staff(EDIT_OWN, "staff_problem_edit_own", &[Capability::EditOwn, Capability::Rejudge]),
        ),
        (
            "staff_problem_see_all",
            staff(SEE_ALL, "staff_problem_see_all", &[Capability::SeeAll]),
        ),
        (
            "staff_problem_edit_all",
            staff(
                EDIT_ALL,
                "staff_problem_edit_all",
                &[Capability::EditOwn, Capability::EditAll],
            ),
        ),
        ("staff_problem_edit_public", edit_public),
        ("staff_problem_see_organization", see_organization),
        (
            "staff_problem_edit_all_with_rejudge",
            staff(
                EDIT_ALL_WITH_REJUDGE,
                "staff_problem_edit_all_with_rejudge",
                &[Capability::EditOwn, Capability::EditAll, Capability::Rejudge],
            ),
        ),
        (
            "staff_problem_edit_own_no_staff",
            Profile::new(EDIT_OWN_NO_STAFF, "staff_problem_edit_own_no_staff")
                .with_capabilities(&[Capability::EditOwn]),
        ),
        ("staff_organization_admin", organization_admin),
        ("normal", normal),
        (
            "staff_solution_see_all",
            Profile::new(SOLUTION_SEE_ALL, "staff_solution_see_all")
                .with_capabilities(&[Capability::SeePrivateSolution]),
        ),
    ];

    let mut users: BTreeMap<_, _> = profiles
        .into_iter()
        .map(|(name, profile)| (name, Viewer::from(profile)))
        .collect();
    users.insert("anonymous", Viewer::Anonymous);
    users
}

pub fn user(name: &str) -> Viewer {
    users()
        .remove(name)
        .unwrap_or_else(|| panic!("no fixture user named {name}"))
}

pub fn basic_problem() -> Problem {
    Problem::builder(1, "basic", 10.0)
        .name("Basic")
        .authors([NORMAL])
        .testers([EDIT_PUBLIC])
        .build()
        .expect("basic problem")
}

pub fn organization_private_problem() -> Problem {
    Problem::builder(2, "organizationprivate", 10.0)
        .public(true)
        .organization_private(true)
        .curators([EDIT_OWN, EDIT_OWN_NO_STAFF])
        .organizations([OPEN_ORG])
        .build()
        .expect("organization private problem")
}

pub fn organization_admin_private_problem() -> Problem {
    Problem::builder(3, "orgadminprivate", 10.0)
        .organization_private(true)
        .organizations([PROBLEM_ORG])
        .build()
        .expect("organization admin private problem")
}

pub fn organization_admin_problem() -> Problem {
    Problem::builder(4, "organizationadmin", 10.0)
        .organizations([PROBLEM_ORG])
        .build()
        .expect("organization admin problem")
}

pub fn open_problem() -> Problem {
    Problem::builder(5, "open", 5.0)
        .public(true)
        .banned_users([SEE_ALL])
        .build()
        .expect("open problem")
}

pub fn private_problem() -> Problem {
    Problem::builder(6, "private", 10.0)
        .build()
        .expect("private problem")
}

pub fn unpublished_problem() -> Problem {
    Problem::builder(7, "unpublished", 10.0)
        .name("Unpublished")
        .authors([EDIT_OWN])
        .build()
        .expect("unpublished problem")
}

pub fn problems() -> Vec<Problem> {
    vec![
        basic_problem(),
        organization_private_problem(),
        organization_admin_private_problem(),
        organization_admin_problem(),
        open_problem(),
        private_problem(),
        unpublished_problem(),
    ]
}

pub fn basic_solution() -> Solution {
    Solution::new(basic_problem(), true, now() - Duration::days(1))
}

pub fn private_solution() -> Solution {
    Solution::new(private_problem(), false, now() - Duration::days(100))
}

pub fn unpublished_solution() -> Solution {
    Solution::new(unpublished_problem(), false, now() + Duration::days(100)).with_authors([NORMAL])
}

/// Expected outcome per user for one check; users left out are not asserted.
pub type Expectations = &'static [(&'static str, bool)];

pub fn assert_for_users<F>(check_name: &str, expectations: Expectations, check: F)
where
    F: Fn(&Viewer) -> bool,
{
    for (name, expected) in expectations {
        assert_eq!(
            check(&user(name)),
            *expected,
            "{check_name} for {name} should be {expected}"
        );
    }
}
