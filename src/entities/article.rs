//! Article entity - Catalog entries managed either by quantity or by serial number.
//!
//! For serial-tracked articles (`serial_tracked = true`) the scalar `stock_quantity`
//! stays at zero; real stock is the number of serial records at a location.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Article database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "articles")]
pub struct Model {
    /// Unique identifier for the article
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name
    #[sea_orm(column_name = "nom")]
    pub name: String,
    /// Internal article number, unique across the catalog
    #[sea_orm(column_name = "numero_article", unique)]
    pub article_number: String,
    /// EAN barcode, if the article carries one
    #[sea_orm(column_name = "code_ean")]
    pub ean: Option<String>,
    /// Category label
    #[sea_orm(column_name = "categorie")]
    pub category: Option<String>,
    /// Preferred supplier
    #[sea_orm(column_name = "fournisseur_id")]
    pub supplier_id: Option<i64>,
    /// Central warehouse quantity (always 0 for serial-tracked articles)
    #[sea_orm(column_name = "quantite_stock")]
    pub stock_quantity: i32,
    /// Minimum stock threshold
    pub stock_minimum: i32,
    /// Maximum stock threshold, used for fill level reporting
    pub stock_maximum: Option<i32>,
    /// Reorder point: at or below this level an alert is raised
    #[sea_orm(column_name = "point_commande")]
    pub reorder_point: i32,
    /// Unit purchase price
    #[sea_orm(column_name = "prix_achat")]
    pub purchase_price: Option<f64>,
    /// Unit sale price
    #[sea_orm(column_name = "prix_vente")]
    pub sale_price: Option<f64>,
    /// Whether stock is tracked per physical unit
    #[sea_orm(column_name = "gestion_par_serie")]
    pub serial_tracked: bool,
}

/// Defines relationships between Article and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each article may have one preferred supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// One article has many serial numbers
    #[sea_orm(has_many = "super::serial_number::Entity")]
    SerialNumbers,
    /// One article has many movements
    #[sea_orm(has_many = "super::movement::Entity")]
    Movements,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::serial_number::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SerialNumbers.def()
    }
}

impl Related<super::movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
