use common::ResultCode;
use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub profile_id: i32,
    pub problem_id: i32,
    pub result_code: ResultCode,
    /// Awarded points, stored exactly.
    pub points: f64,
    pub language: String,
}

impl ActiveModelBehavior for ActiveModel {}
