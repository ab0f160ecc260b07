//! Serial number business logic - Individually tracked units.
//!
//! A unit's location label is authoritative. Its status is derived from the location
//! and rewritten together with it, never set on its own.

use crate::{
    core::{catalog, location::LocationKind},
    entities::{SerialNumber, serial_number},
    errors::{Error, Result},
};
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::debug;

/// Status of a unit, derived from where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialStatus {
    /// In the central warehouse
    InStock,
    /// Held by a technician
    WithTechnician,
    /// Installed at a client, returned to a supplier, or scrapped
    Out,
}

impl SerialStatus {
    /// Derives the status from a location label.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        match LocationKind::classify(location) {
            LocationKind::Warehouse => Self::InStock,
            LocationKind::Technician => Self::WithTechnician,
            LocationKind::External => Self::Out,
        }
    }

    /// Value stored in the `statut` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "en_stock",
            Self::WithTechnician => "chez_technicien",
            Self::Out => "sorti",
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Registers a new unit of `article_id` at `location`.
///
/// At least one of `serial` and `mac_address` must be given, and neither may already
/// be registered.
pub async fn register_serial<C>(
    db: &C,
    article_id: i64,
    serial: Option<String>,
    mac_address: Option<String>,
    location: &str,
) -> Result<serial_number::Model>
where
    C: ConnectionTrait,
{
    let serial = non_empty(serial);
    let mac_address = non_empty(mac_address);
    if serial.is_none() && mac_address.is_none() {
        return Err(Error::Config {
            message: "A serial number or a MAC address is required".to_string(),
        });
    }

    catalog::require_article(db, article_id).await?;

    let mut duplicate = Condition::any();
    if let Some(serial) = &serial {
        duplicate = duplicate.add(serial_number::Column::Serial.eq(serial.as_str()));
    }
    if let Some(mac) = &mac_address {
        duplicate = duplicate.add(serial_number::Column::MacAddress.eq(mac.as_str()));
    }
    if let Some(existing) = SerialNumber::find().filter(duplicate).one(db).await? {
        return Err(Error::Config {
            message: format!("Serial '{}' is already registered", existing.label()),
        });
    }

    let unit = serial_number::ActiveModel {
        article_id: Set(article_id),
        serial: Set(serial),
        mac_address: Set(mac_address),
        location: Set(location.to_string()),
        status: Set(SerialStatus::from_location(location).as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    unit.insert(db).await.map_err(Into::into)
}

/// Finds a unit by ID.
pub async fn get_serial_by_id<C>(db: &C, serial_id: i64) -> Result<Option<serial_number::Model>>
where
    C: ConnectionTrait,
{
    SerialNumber::find_by_id(serial_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a unit by ID, failing with `SerialNotFound` if absent.
pub async fn require_serial<C>(db: &C, serial_id: i64) -> Result<serial_number::Model>
where
    C: ConnectionTrait,
{
    get_serial_by_id(db, serial_id)
        .await?
        .ok_or_else(|| Error::SerialNotFound {
            reference: serial_id.to_string(),
        })
}

/// Units whose serial string or MAC address contains `token`, oldest first.
pub async fn find_serials_matching<C>(db: &C, token: &str) -> Result<Vec<serial_number::Model>>
where
    C: ConnectionTrait,
{
    SerialNumber::find()
        .filter(
            Condition::any()
                .add(serial_number::Column::Serial.contains(token))
                .add(serial_number::Column::MacAddress.contains(token)),
        )
        .order_by_asc(serial_number::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All units of an article.
pub async fn serials_for_article<C>(db: &C, article_id: i64) -> Result<Vec<serial_number::Model>>
where
    C: ConnectionTrait,
{
    SerialNumber::find()
        .filter(serial_number::Column::ArticleId.eq(article_id))
        .order_by_asc(serial_number::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether any unit of the article is registered at all.
pub async fn has_serials<C>(db: &C, article_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let count = SerialNumber::find()
        .filter(serial_number::Column::ArticleId.eq(article_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Number of units of an article at `location`.
pub async fn count_serials_at<C>(db: &C, article_id: i64, location: &str) -> Result<u64>
where
    C: ConnectionTrait,
{
    SerialNumber::find()
        .filter(serial_number::Column::ArticleId.eq(article_id))
        .filter(serial_number::Column::Location.eq(location))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Moves a unit to `location`, rewriting its derived status.
pub async fn relocate_serial<C>(
    db: &C,
    serial_id: i64,
    location: &str,
) -> Result<serial_number::Model>
where
    C: ConnectionTrait,
{
    let mut unit: serial_number::ActiveModel = require_serial(db, serial_id).await?.into();
    unit.location = Set(location.to_string());
    unit.status = Set(SerialStatus::from_location(location).as_str().to_string());
    let unit = unit.update(db).await?;
    debug!("Serial {serial_id} relocated to {location}");
    Ok(unit)
}
