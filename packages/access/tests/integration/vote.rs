use access::identity::{ContestParticipation, Profile};
use access::{
    Problem, SubmissionHistory, SubmissionRecord, VotePermission, VoteReason, Viewer, decide_vote,
    vote_permission_for_user,
};
use chrono::Duration;
use common::ResultCode;

use crate::fixtures::*;

fn full_score() -> SubmissionHistory {
    SubmissionHistory::full_score(basic_problem().points())
}

fn permission(profile: Profile, history: SubmissionHistory) -> VotePermission {
    decide_vote(&Viewer::from(profile), &basic_problem(), &history, now()).permission
}

#[test]
fn anonymous_cannot_see_votes() {
    assert_eq!(
        vote_permission_for_user(&Viewer::Anonymous, &basic_problem(), &full_score()),
        VotePermission::None
    );
}

#[test]
fn live_contest_dominates_submission_history() {
    let mut in_contest = Profile::new(100, "in_contest");
    in_contest.current_contest = Some(ContestParticipation {
        contest: 1,
        ends_at: Some(now() + Duration::days(100)),
    });
    let decision = decide_vote(
        &Viewer::from(in_contest),
        &basic_problem(),
        &full_score(),
        now(),
    );
    assert_eq!(decision.permission, VotePermission::None);
    assert_eq!(decision.reason, VoteReason::InLiveContest);
}

#[test]
fn unsolved_gets_none_not_view() {
    assert_eq!(
        permission(Profile::new(101, "fresh"), SubmissionHistory::unsolved()),
        VotePermission::None
    );

    let mut banned = Profile::new(102, "banned_unsolved");
    banned.is_banned_from_problem_voting = true;
    assert_eq!(
        permission(banned, SubmissionHistory::unsolved()),
        VotePermission::None
    );
}

#[test]
fn banned_users_can_only_view() {
    let mut banned_from_voting = Profile::new(103, "banned_from_voting");
    banned_from_voting.is_banned_from_problem_voting = true;
    assert_eq!(
        permission(banned_from_voting, full_score()),
        VotePermission::View
    );

    let problem = Problem::builder(1, "basic", 10.0)
        .banned_users([104])
        .build()
        .unwrap();
    let decision = decide_vote(
        &Viewer::from(Profile::new(104, "banned_from_problem")),
        &problem,
        &full_score(),
        now(),
    );
    assert_eq!(decision.permission, VotePermission::View);
    assert_eq!(decision.reason, VoteReason::BannedFromProblem);
}

#[test]
fn unlisted_users_can_only_view() {
    let mut unlisted = Profile::new(105, "unlisted");
    unlisted.is_unlisted = true;
    assert_eq!(permission(unlisted, full_score()), VotePermission::View);
}

#[test]
fn partial_credit_can_only_view() {
    let problem = basic_problem();
    assert_ne!(problem.points(), 0.5);
    let records = [
        SubmissionRecord {
            profile: 106,
            problem: problem.id(),
            result: ResultCode::Accepted,
            points: 0.5,
            language: "PY3".into(),
        },
        SubmissionRecord {
            profile: 106,
            problem: problem.id(),
            result: ResultCode::WrongAnswer,
            points: problem.points(),
            language: "PY3".into(),
        },
    ];
    let history = SubmissionHistory::from_records(&records, 106, &problem);
    let decision = decide_vote(
        &Viewer::from(Profile::new(106, "partial_ac")),
        &problem,
        &history,
        now(),
    );
    assert_eq!(decision.permission, VotePermission::View);
    assert_eq!(decision.reason, VoteReason::PartialCredit);
}

#[test]
fn full_score_can_vote() {
    let decision = decide_vote(&user("normal"), &basic_problem(), &full_score(), now());
    assert_eq!(decision.permission, VotePermission::Vote);
    assert_eq!(decision.reason, VoteReason::Eligible);
    assert!(decision.permission.can_vote());
}

#[test]
fn full_score_counts_even_with_a_higher_accepted_score() {
    let problem = basic_problem();
    let records: Vec<SubmissionRecord> = [problem.points(), problem.points() + 2.0]
        .into_iter()
        .map(|points| SubmissionRecord {
            profile: 107,
            problem: problem.id(),
            result: ResultCode::Accepted,
            points,
            language: "PY3".into(),
        })
        .collect();
    let history = SubmissionHistory::from_records(&records, 107, &problem);
    let decision = decide_vote(
        &Viewer::from(Profile::new(107, "rescored")),
        &problem,
        &history,
        now(),
    );
    assert_eq!(decision.permission, VotePermission::Vote);
    assert_eq!(decision.reason, VoteReason::Eligible);
}

#[test]
fn only_higher_accepted_scores_is_partial_credit() {
    let problem = basic_problem();
    let records = [SubmissionRecord {
        profile: 108,
        problem: problem.id(),
        result: ResultCode::Accepted,
        points: problem.points() + 2.0,
        language: "PY3".into(),
    }];
    let history = SubmissionHistory::from_records(&records, 108, &problem);
    let decision = decide_vote(
        &Viewer::from(Profile::new(108, "overscored")),
        &problem,
        &history,
        now(),
    );
    assert_eq!(decision.reason, VoteReason::PartialCredit);
}
