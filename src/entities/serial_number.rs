//! Serial number entity - One physical unit of a serial-tracked article.
//!
//! The `location` label is the source of truth; `status` is rewritten from it
//! every time the unit moves.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Serial number database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "numeros_serie")]
pub struct Model {
    /// Unique identifier for the unit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning article
    pub article_id: i64,
    /// Manufacturer serial string
    #[sea_orm(column_name = "numero_serie")]
    pub serial: Option<String>,
    /// MAC address for network equipment
    #[sea_orm(column_name = "adresse_mac")]
    pub mac_address: Option<String>,
    /// Current location label
    #[sea_orm(column_name = "localisation")]
    pub location: String,
    /// Status derived from `location`
    #[sea_orm(column_name = "statut")]
    pub status: String,
    /// When the unit was registered
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Best identifier for display: serial string, else MAC address.
    #[must_use]
    pub fn label(&self) -> &str {
        self.serial
            .as_deref()
            .or(self.mac_address.as_deref())
            .unwrap_or_default()
    }
}

/// Defines relationships between `SerialNumber` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unit belongs to one article
    #[sea_orm(
        belongs_to = "super::article::Entity",
        from = "Column::ArticleId",
        to = "super::article::Column::Id"
    )]
    Article,
}

impl Related<super::article::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Article.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
