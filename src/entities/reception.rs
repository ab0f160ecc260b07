//! Reception entity - One delivery received against a purchase order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reception database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receptions_commande")]
pub struct Model {
    /// Unique identifier for the reception
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Purchase order being received
    #[sea_orm(column_name = "bon_commande_id")]
    pub purchase_order_id: i64,
    /// Quantity received in this delivery
    #[sea_orm(column_name = "quantite")]
    pub quantity: i32,
    /// When the delivery was received
    #[sea_orm(column_name = "date_reception")]
    pub received_at: DateTimeUtc,
}

/// Defines relationships between Reception and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each reception belongs to one purchase order
    #[sea_orm(
        belongs_to = "super::purchase_order::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_order::Column::Id"
    )]
    PurchaseOrder,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
