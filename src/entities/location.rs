//! Location entity - Reference list of named storage locations (`emplacements`).
//!
//! Movements and stock rows store location labels as plain text; this table only
//! feeds selection lists and documents what each label means.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Location database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emplacements")]
pub struct Model {
    /// Unique identifier for the location
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Label used by movements and scenarios (e.g., "Entrepot")
    #[sea_orm(column_name = "nom", unique)]
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
