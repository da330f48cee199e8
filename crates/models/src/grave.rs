use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grave")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub section: Option<String>,
    pub row: Option<String>,
    pub plot: Option<String>,
    pub coord_x: i32,
    pub coord_y: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceRequest,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRequest => Entity::has_many(crate::service_request::Entity).into(),
        }
    }
}

impl Related<crate::service_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Coordinates in their `"x,y"` wire form.
    pub fn coordinates(&self) -> String {
        format!("{},{}", self.coord_x, self.coord_y)
    }
}
