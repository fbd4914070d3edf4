use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A submitted report. `password` is kept exactly as the client sent it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "report")]
#[schema(as = Report)]
pub struct Model {
    #[sea_orm(primary_key, column_name = "reportId")]
    #[serde(rename = "reportId")]
    pub report_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub address: String,
    #[sea_orm(column_type = "Text")]
    pub password: String,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    pub date: DateTime,
    pub receive: bool,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
