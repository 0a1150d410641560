//! SeaORM rendering of the bulk filters, plus the reads the policy needs
//! from the relational schema.

use std::collections::HashMap;

use common::ResultCode;
use sea_orm::sea_query::{Expr, Query as SeaQuery};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::entity::{
    problem, problem_author, problem_banned_user, problem_curator, problem_organization,
    problem_tester, submission,
};
use crate::error::Result;
use crate::identity::ProfileId;
use crate::problem::Problem;
use crate::rules::ProblemFilter;
use crate::store::StoreError;
use crate::submission::SubmissionHistory;

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl ProblemFilter {
    /// Render as a condition on the `problem` table.
    pub fn to_condition(&self) -> Condition {
        match self {
            ProblemFilter::Always => Condition::all().add(Expr::cust("1 = 1")),
            ProblemFilter::Never => Condition::all().add(Expr::cust("1 = 0")),
            ProblemFilter::IsPublic => Condition::all().add(problem::Column::IsPublic.eq(true)),
            ProblemFilter::IsOrganizationPrivate => {
                Condition::all().add(problem::Column::IsOrganizationPrivate.eq(true))
            }
            ProblemFilter::AuthoredBy(id) => Condition::all().add(
                problem::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(problem_author::Column::ProblemId)
                        .from(problem_author::Entity)
                        .and_where(problem_author::Column::ProfileId.eq(*id))
                        .to_owned(),
                ),
            ),
            ProblemFilter::CuratedBy(id) => Condition::all().add(
                problem::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(problem_curator::Column::ProblemId)
                        .from(problem_curator::Entity)
                        .and_where(problem_curator::Column::ProfileId.eq(*id))
                        .to_owned(),
                ),
            ),
            ProblemFilter::TestedBy(id) => Condition::all().add(
                problem::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(problem_tester::Column::ProblemId)
                        .from(problem_tester::Entity)
                        .and_where(problem_tester::Column::ProfileId.eq(*id))
                        .to_owned(),
                ),
            ),
            ProblemFilter::InOrganizations(ids) => Condition::all().add(
                problem::Column::Id.in_subquery(
                    SeaQuery::select()
                        .column(problem_organization::Column::ProblemId)
                        .from(problem_organization::Entity)
                        .and_where(
                            problem_organization::Column::OrganizationId
                                .is_in(ids.iter().copied()),
                        )
                        .to_owned(),
                ),
            ),
            ProblemFilter::Not(inner) => inner.to_condition().not(),
            ProblemFilter::And(parts) => parts
                .iter()
                .fold(Condition::all(), |cond, part| cond.add(part.to_condition())),
            ProblemFilter::Or(parts) => parts
                .iter()
                .fold(Condition::any(), |cond, part| cond.add(part.to_condition())),
        }
    }
}

/// Accepted-submission summary of `profile` on `problem`.
pub async fn submission_history<C: ConnectionTrait>(
    db: &C,
    profile: ProfileId,
    problem: &Problem,
) -> std::result::Result<SubmissionHistory, StoreError> {
    let accepted = || {
        submission::Entity::find()
            .filter(submission::Column::ProfileId.eq(profile))
            .filter(submission::Column::ProblemId.eq(problem.id()))
            .filter(submission::Column::ResultCode.eq(ResultCode::Accepted))
    };

    let best: Option<Option<f64>> = accepted()
        .select_only()
        .column_as(submission::Column::Points.max(), "best")
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?;
    let full_scores = accepted()
        .filter(submission::Column::Points.eq(problem.points()))
        .count(db)
        .await?;

    Ok(SubmissionHistory {
        best_accepted_points: best.flatten(),
        has_full_score: full_scores > 0,
    })
}

/// Load every problem with its role, organization and ban sets, ordered by
/// code.
pub async fn load_problems<C: ConnectionTrait>(db: &C) -> Result<Vec<Problem>> {
    let rows = problem::Entity::find()
        .order_by_asc(problem::Column::Code)
        .all(db)
        .await
        .map_err(StoreError::from)?;

    let authors = group(
        problem_author::Entity::find()
            .all(db)
            .await
            .map_err(StoreError::from)?
            .into_iter()
            .map(|m| (m.problem_id, m.profile_id)),
    );
    let curators = group(
        problem_curator::Entity::find()
            .all(db)
            .await
            .map_err(StoreError::from)?
            .into_iter()
            .map(|m| (m.problem_id, m.profile_id)),
    );
    let testers = group(
        problem_tester::Entity::find()
            .all(db)
            .await
            .map_err(StoreError::from)?
            .into_iter()
            .map(|m| (m.problem_id, m.profile_id)),
    );
    let organizations = group(
        problem_organization::Entity::find()
            .all(db)
            .await
            .map_err(StoreError::from)?
            .into_iter()
            .map(|m| (m.problem_id, m.organization_id)),
    );
    let banned_users = group(
        problem_banned_user::Entity::find()
            .all(db)
            .await
            .map_err(StoreError::from)?
            .into_iter()
            .map(|m| (m.problem_id, m.profile_id)),
    );

    rows.into_iter()
        .map(|row| {
            let members =
                |map: &HashMap<i32, Vec<i32>>| map.get(&row.id).cloned().unwrap_or_default();
            Problem::builder(row.id, row.code.clone(), row.points)
                .name(row.name.clone())
                .public(row.is_public)
                .organization_private(row.is_organization_private)
                .authors(members(&authors))
                .curators(members(&curators))
                .testers(members(&testers))
                .organizations(members(&organizations))
                .banned_users(members(&banned_users))
                .build()
        })
        .collect()
}

fn group(pairs: impl Iterator<Item = (i32, i32)>) -> HashMap<i32, Vec<i32>> {
    let mut map: HashMap<i32, Vec<i32>> = HashMap::new();
    for (key, value) in pairs {
        map.entry(key).or_default().push(value);
    }
    map
}
