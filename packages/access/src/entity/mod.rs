//! Relational layout of the problem tables the bulk filters run against.

pub mod problem;
pub mod problem_author;
pub mod problem_banned_user;
pub mod problem_curator;
pub mod problem_organization;
pub mod problem_tester;
pub mod submission;
