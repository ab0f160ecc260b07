//! Person entity - Technicians, clients and other movement participants.
//!
//! Only persons with the `technicien` role can hold technician stock, but every
//! person can be attributed as the actor of a movement.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role value identifying field technicians
pub const TECHNICIAN_ROLE: &str = "technicien";

/// Person database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personnes")]
pub struct Model {
    /// Unique identifier for the person
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    #[sea_orm(column_name = "prenom")]
    pub first_name: String,
    /// Family name
    #[sea_orm(column_name = "nom")]
    pub last_name: String,
    /// Role label (`"technicien"`, `"client"`, ...)
    pub role: String,
    /// Contact email
    pub email: Option<String>,
    /// Inactive persons are hidden from selection lists
    #[sea_orm(column_name = "actif")]
    pub active: bool,
}

impl Model {
    /// Returns "First Last", the form used in movement remarks.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this person may hold technician stock.
    #[must_use]
    pub fn is_technician(&self) -> bool {
        self.role.eq_ignore_ascii_case(TECHNICIAN_ROLE)
    }
}

/// Defines relationships between Person and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One technician holds many stock rows
    #[sea_orm(has_many = "super::technician_stock::Entity")]
    TechnicianStock,
}

impl Related<super::technician_stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TechnicianStock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
