//! Inventory line entity - One counted article (or serial unit) in a session.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lignes_inventaire")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent session
    #[sea_orm(column_name = "inventaire_id")]
    pub inventory_id: i64,
    /// Article counted
    pub article_id: i64,
    /// Serial unit counted, if any
    #[sea_orm(column_name = "numero_serie_id")]
    pub serial_number_id: Option<i64>,
    /// Physically counted quantity
    #[sea_orm(column_name = "quantite_comptee")]
    pub counted_quantity: i32,
    /// Quantity the system held when the line was saved
    #[sea_orm(column_name = "quantite_systeme")]
    pub system_quantity: i32,
}

impl Model {
    /// Counted minus system quantity.
    #[must_use]
    pub fn discrepancy(&self) -> i64 {
        i64::from(self.counted_quantity) - i64::from(self.system_quantity)
    }
}

/// Defines relationships between `InventoryLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one session
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::InventoryId",
        to = "super::inventory::Column::Id"
    )]
    Inventory,
    /// Each line concerns one article
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
    /// Each line may concern one serial unit
    #[sea_orm(
        belongs_to = "super::serial_number::Entity",
        from = "Column::SerialNumberId",
        to = "super::serial_number::Column::Id"
    )]
    SerialNumber,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
