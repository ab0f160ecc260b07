//! Inventory entity - A count session at one location.
//!
//! Sessions start `InProgress`, and end either `Validated` (stock corrected from
//! the counted lines) or `Cancelled`. Both end states are terminal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an inventory session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum InventoryStatus {
    /// Lines may still be saved
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Counted quantities have been applied to stock
    #[sea_orm(string_value = "validated")]
    Validated,
    /// Abandoned without touching stock
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in_progress"),
            Self::Validated => write!(f, "validated"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Inventory database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventaires")]
pub struct Model {
    /// Unique identifier for the session
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the count started
    pub date: DateTimeUtc,
    /// Location label being counted
    #[sea_orm(column_name = "localisation")]
    pub location: String,
    /// Technician whose stock is counted, for technician-scoped locations
    #[sea_orm(column_name = "technicien_id")]
    pub technician_id: Option<i64>,
    /// Lifecycle status
    #[sea_orm(column_name = "statut")]
    pub status: InventoryStatus,
    /// When the session was validated
    #[sea_orm(column_name = "date_validation")]
    pub validated_at: Option<DateTimeUtc>,
}

/// Defines relationships between Inventory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One session has many counted lines
    #[sea_orm(has_many = "super::inventory_line::Entity")]
    Lines,
    /// A session may be scoped to one technician
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::TechnicianId",
        to = "super::person::Column::Id"
    )]
    Technician,
}

impl Related<super::inventory_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
