//! Scenario entity - User-maintained rules for stock movements.
//!
//! A scenario maps an origin location and a free-text movement type label to a
//! destination location and the kind of participant expected. Movements do not
//! reference scenarios by id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scenario database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scenarios_mouvement")]
pub struct Model {
    /// Unique identifier for the scenario
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Origin location label (e.g., "Entrepot")
    #[sea_orm(column_name = "emplacement_origine")]
    pub origin: String,
    /// Movement type label as shown to users (e.g., "Sortie technicien")
    #[sea_orm(column_name = "type_mouvement")]
    pub movement_type: String,
    /// Destination location label
    #[sea_orm(column_name = "emplacement_destination")]
    pub destination: String,
    /// Participant expected for this movement (`"technicien"`, `"client"`, ...)
    #[sea_orm(column_name = "personne_type")]
    pub participant_type: Option<String>,
    /// What happens at the origin (free text)
    #[sea_orm(column_name = "action_origine")]
    pub origin_action: Option<String>,
    /// What happens at the destination (free text)
    #[sea_orm(column_name = "action_destination")]
    pub destination_action: Option<String>,
    /// One-line description of the scenario
    #[sea_orm(column_name = "resume_action")]
    pub summary: Option<String>,
    /// Explicit effect on warehouse stock: `"increase"`, `"decrease"` or `"none"`
    #[sea_orm(column_name = "effet_stock")]
    pub stock_effect: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
