//! The SQL rendering of the list filters, checked against the per-object
//! checks on a real database.
#![cfg(feature = "sea-orm")]

use access::entity::{
    problem, problem_author, problem_banned_user, problem_curator, problem_organization,
    problem_tester, submission,
};
use access::problem_access::{is_accessible_by, is_editable_by};
use access::query::{load_problems, submission_history};
use access::{
    Problem, VotePermission, VoteReason, decide_vote, get_editable_problems, get_visible_problems,
};
use common::ResultCode;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::fixtures::*;

async fn connect() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory SQLite database");
    db.get_schema_registry("access::entity::*")
        .sync(&db)
        .await
        .expect("Failed to create schema");
    db
}

async fn insert_problem(db: &DatabaseConnection, p: &Problem) {
    problem::Entity::insert(problem::ActiveModel {
        id: Set(p.id()),
        code: Set(p.code().to_string()),
        name: Set(p.name().to_string()),
        points: Set(p.points()),
        is_public: Set(p.is_public()),
        is_organization_private: Set(p.is_organization_private()),
        ..Default::default()
    })
    .exec_without_returning(db)
    .await
    .expect("insert problem");

    for id in p.authors() {
        problem_author::Entity::insert(problem_author::ActiveModel {
            problem_id: Set(p.id()),
            profile_id: Set(*id),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("insert author");
    }
    for id in p.curators() {
        problem_curator::Entity::insert(problem_curator::ActiveModel {
            problem_id: Set(p.id()),
            profile_id: Set(*id),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("insert curator");
    }
    for id in p.testers() {
        problem_tester::Entity::insert(problem_tester::ActiveModel {
            problem_id: Set(p.id()),
            profile_id: Set(*id),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("insert tester");
    }
    for id in p.organizations() {
        problem_organization::Entity::insert(problem_organization::ActiveModel {
            problem_id: Set(p.id()),
            organization_id: Set(*id),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("insert organization");
    }
    for id in p.banned_users() {
        problem_banned_user::Entity::insert(problem_banned_user::ActiveModel {
            problem_id: Set(p.id()),
            profile_id: Set(*id),
            ..Default::default()
        })
        .exec_without_returning(db)
        .await
        .expect("insert banned user");
    }
}

async fn seeded() -> (DatabaseConnection, Vec<Problem>) {
    let db = connect().await;
    let mut problems = problems();
    for p in &problems {
        insert_problem(&db, p).await;
    }
    problems.sort_by(|a, b| a.code().cmp(b.code()));
    (db, problems)
}

async fn selected_codes(db: &DatabaseConnection, condition: sea_orm::Condition) -> Vec<String> {
    problem::Entity::find()
        .filter(condition)
        .order_by_asc(problem::Column::Code)
        .all(db)
        .await
        .expect("filter problems")
        .into_iter()
        .map(|row| row.code)
        .collect()
}

#[tokio::test]
async fn loads_problem_snapshots() {
    let (db, problems) = seeded().await;
    assert_eq!(load_problems(&db).await.unwrap(), problems);
}

#[tokio::test]
async fn sql_filters_match_scalar_checks() {
    let (db, problems) = seeded().await;

    for (name, viewer) in users() {
        let accessible: Vec<String> = problems
            .iter()
            .filter(|p| is_accessible_by(&viewer, p))
            .map(|p| p.code().to_string())
            .collect();
        let visible = selected_codes(&db, get_visible_problems(&viewer).to_condition()).await;
        assert_eq!(visible, accessible, "visible problems for {name}");

        let editable: Vec<String> = problems
            .iter()
            .filter(|p| is_editable_by(&viewer, p))
            .map(|p| p.code().to_string())
            .collect();
        let editable_rows =
            selected_codes(&db, get_editable_problems(&viewer).to_condition()).await;
        assert_eq!(editable_rows, editable, "editable problems for {name}");
    }
}

async fn insert_submission(
    db: &DatabaseConnection,
    profile: i32,
    result_code: ResultCode,
    points: f64,
) {
    submission::Entity::insert(submission::ActiveModel {
        profile_id: Set(profile),
        problem_id: Set(1),
        result_code: Set(result_code),
        points: Set(points),
        language: Set("PY3".into()),
        ..Default::default()
    })
    .exec_without_returning(db)
    .await
    .expect("insert submission");
}

#[tokio::test]
async fn loaded_snapshots_keep_problem_bans() {
    let (db, _) = seeded().await;
    let loaded = load_problems(&db).await.unwrap();
    let open = loaded.iter().find(|p| p.code() == "open").unwrap();
    assert!(open.banned_users().contains(&SEE_ALL));

    let history = access::SubmissionHistory::full_score(open.points());
    let decision = decide_vote(&user("staff_problem_see_all"), open, &history, now());
    assert_eq!(decision.permission, VotePermission::View);
    assert_eq!(decision.reason, VoteReason::BannedFromProblem);
}

#[tokio::test]
async fn reads_accepted_submission_summary() {
    let (db, problems) = seeded().await;
    let basic = problems.iter().find(|p| p.id() == 1).unwrap();

    insert_submission(&db, NORMAL, ResultCode::Accepted, 4.0).await;
    insert_submission(&db, NORMAL, ResultCode::WrongAnswer, 10.0).await;
    insert_submission(&db, EDIT_OWN, ResultCode::TimeLimitExceeded, 0.0).await;
    insert_submission(&db, SEE_ALL, ResultCode::Accepted, 10.0).await;
    insert_submission(&db, SEE_ALL, ResultCode::Accepted, 12.0).await;

    let partial = submission_history(&db, NORMAL, basic).await.unwrap();
    assert_eq!(partial.best_accepted_points, Some(4.0));
    assert!(!partial.has_full_score);

    let failed = submission_history(&db, EDIT_OWN, basic).await.unwrap();
    assert!(!failed.has_accepted());

    let full = submission_history(&db, SEE_ALL, basic).await.unwrap();
    assert_eq!(full.best_accepted_points, Some(12.0));
    assert!(full.has_full_score);
}
