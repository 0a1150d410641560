use common::ResultCode;
use serde::{Deserialize, Serialize};

use crate::identity::{ProblemId, ProfileId};
use crate::problem::Problem;

/// A judged submission, as read from the submission store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub profile: ProfileId,
    pub problem: ProblemId,
    pub result: ResultCode,
    pub points: f64,
    pub language: String,
}

/// What the voting policy needs to know about one user's submissions to one
/// problem.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SubmissionHistory {
    /// Highest points among accepted submissions, `None` without any.
    pub best_accepted_points: Option<f64>,
    /// Some accepted submission scored exactly the problem's points.
    pub has_full_score: bool,
}

impl SubmissionHistory {
    pub fn unsolved() -> Self {
        Self::default()
    }

    /// Accepted, but never at the problem's full points.
    pub fn partial(best: f64) -> Self {
        Self {
            best_accepted_points: Some(best),
            has_full_score: false,
        }
    }

    /// Accepted at full points, with `best` the highest accepted score.
    pub fn full_score(best: f64) -> Self {
        Self {
            best_accepted_points: Some(best),
            has_full_score: true,
        }
    }

    /// Summarize the records belonging to `profile` and `problem`.
    pub fn from_records<'a, I>(records: I, profile: ProfileId, problem: &Problem) -> Self
    where
        I: IntoIterator<Item = &'a SubmissionRecord>,
    {
        records
            .into_iter()
            .filter(|r| {
                r.profile == profile && r.problem == problem.id() && r.result.is_accepted()
            })
            .fold(Self::unsolved(), |history, r| {
                // Awarded points are stored exactly; partial credit is strictly lower.
                #[allow(clippy::float_cmp)]
                let full = r.points == problem.points();
                Self {
                    best_accepted_points: Some(
                        history
                            .best_accepted_points
                            .map_or(r.points, |best| best.max(r.points)),
                    ),
                    has_full_score: history.has_full_score || full,
                }
            })
    }

    pub fn has_accepted(&self) -> bool {
        self.best_accepted_points.is_some()
    }
}
