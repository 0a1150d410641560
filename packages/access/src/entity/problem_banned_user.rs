use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "problem_banned_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub problem_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub profile_id: i32,
}

impl ActiveModelBehavior for ActiveModel {}
