//! Purchase order entity - Quantities ordered from a supplier (`bons_commande`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reception status of a purchase order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum OrderStatus {
    /// Nothing received yet
    #[sea_orm(string_value = "open")]
    Open,
    /// Some, but not all, of the ordered quantity received
    #[sea_orm(string_value = "partially_received")]
    PartiallyReceived,
    /// Fully received; no further receptions accepted
    #[sea_orm(string_value = "received")]
    Received,
}

/// Purchase order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bons_commande")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier the order was placed with
    #[sea_orm(column_name = "fournisseur_id")]
    pub supplier_id: i64,
    /// Article ordered
    pub article_id: i64,
    /// Quantity ordered
    #[sea_orm(column_name = "quantite_commandee")]
    pub quantity_ordered: i32,
    /// Quantity received so far
    #[sea_orm(column_name = "quantite_recue")]
    pub quantity_received: i32,
    /// Reception status
    #[sea_orm(column_name = "statut")]
    pub status: OrderStatus,
    /// When the order was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Quantity still expected from the supplier.
    #[must_use]
    pub const fn outstanding(&self) -> i32 {
        self.quantity_ordered - self.quantity_received
    }
}

/// Defines relationships between `PurchaseOrder` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order is placed with one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// Each order concerns one article
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
    /// One order has many receptions
    #[sea_orm(has_many = "super::reception::Entity")]
    Receptions,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::reception::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
