use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub points: f64,
    pub is_public: bool,
    pub is_organization_private: bool,
}

impl ActiveModelBehavior for ActiveModel {}
