use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grave;

pub use migration::REQUEST_STATUS_ALIASES as STATUS_ALIASES;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub grave_id: i32,
    pub service_type: String,
    pub date: String,
    pub status: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub scheduled_date: Option<String>,
    /// JSON array serialized as text.
    #[sea_orm(column_type = "Text", nullable)]
    pub services: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub total_cost: Option<f64>,
    #[sea_orm(column_type = "Double")]
    pub discount: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub admin_notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Grave,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Grave => Entity::belongs_to(grave::Entity)
                .from(Column::GraveId)
                .to(grave::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<grave::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grave.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
