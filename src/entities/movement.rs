//! Movement entity - Immutable log of quantity transfers between locations.
//!
//! Rows are only ever inserted by the movement recorder; they are never updated
//! or deleted. `movement_type` holds the canonical movement code.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mouvements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Article moved
    pub article_id: i64,
    /// Specific unit moved, for serial-tracked articles
    #[sea_orm(column_name = "numero_serie_id")]
    pub serial_number_id: Option<i64>,
    /// Acting technician (destination technician when present, else source)
    #[sea_orm(column_name = "personne_id")]
    pub person_id: Option<i64>,
    /// Canonical movement code (e.g., `"reception"`, `"sortie_technicien"`)
    #[sea_orm(column_name = "type_mouvement")]
    pub movement_type: String,
    /// Origin location label
    #[sea_orm(column_name = "localisation_origine")]
    pub origin_location: String,
    /// Destination location label
    #[sea_orm(column_name = "localisation_destination")]
    pub destination_location: String,
    /// Quantity moved (1 for a serial unit)
    #[sea_orm(column_name = "quantite")]
    pub quantity: i32,
    /// Free-text remarks, prefixed with a transfer note between technicians
    #[sea_orm(column_name = "remarques")]
    pub remarks: Option<String>,
    /// When the movement was recorded
    #[sea_orm(column_name = "date_mouvement")]
    pub moved_at: DateTimeUtc,
}

/// Defines relationships between Movement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement concerns one article
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
    /// Each movement may concern one serial unit
    #[sea_orm(
        belongs_to = "super::serial_number::Entity",
        from = "Column::SerialNumberId",
        to = "super::serial_number::Column::Id"
    )]
    SerialNumber,
    /// Each movement may be attributed to one person
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl Related<super::serial_number::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SerialNumber.def()
    }
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
