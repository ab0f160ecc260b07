//! Technician stock entity - Denormalized quantity held by one technician.
//!
//! Effectively keyed by (technician, article, serial-or-null). Quantities are
//! always positive: a row that would reach zero is deleted instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Default sub-location for newly created rows
pub const DEFAULT_SUB_LOCATION: &str = "vehicule";

/// Technician stock database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_technicien")]
pub struct Model {
    /// Unique identifier for the row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Holding technician
    #[sea_orm(column_name = "technicien_id")]
    pub technician_id: i64,
    /// Article held
    pub article_id: i64,
    /// Specific unit held, for serial-tracked articles
    #[sea_orm(column_name = "numero_serie_id")]
    pub serial_number_id: Option<i64>,
    /// Quantity held, always > 0
    #[sea_orm(column_name = "quantite")]
    pub quantity: i32,
    /// Sub-location (defaults to the technician's vehicle)
    #[sea_orm(column_name = "localisation")]
    pub location: String,
    /// Last time the quantity changed
    #[sea_orm(column_name = "derniere_mise_a_jour")]
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `TechnicianStock` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each row belongs to one technician
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::TechnicianId",
        to = "super::person::Column::Id"
    )]
    Technician,
    /// Each row concerns one article
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
    /// Each row may concern one serial unit
    #[sea_orm(
        belongs_to = "super::serial_number::Entity",
        from = "Column::SerialNumberId",
        to = "super::serial_number::Column::Id"
    )]
    SerialNumber,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Technician.def()
    }
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
