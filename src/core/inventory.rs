//! Inventory business logic - Count sessions and their reconciliation.
//!
//! A session counts one location. Lines record the counted quantity next to the
//! quantity the system held when the line was saved. Validating the session makes
//! the counted quantities the new truth for every line with a discrepancy.

use crate::{
    core::{batch::WorkingBatch, catalog, location::LocationKind, person, technician_stock},
    entities::{
        Inventory, InventoryLine,
        inventory::{self, InventoryStatus},
        inventory_line, serial_number,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Finds a session by ID, failing with `InventoryNotFound` if absent.
pub async fn require_inventory<C>(db: &C, inventory_id: i64) -> Result<inventory::Model>
where
    C: ConnectionTrait,
{
    Inventory::find_by_id(inventory_id)
        .one(db)
        .await?
        .ok_or(Error::InventoryNotFound { inventory_id })
}

async fn require_open<C>(db: &C, inventory_id: i64) -> Result<inventory::Model>
where
    C: ConnectionTrait,
{
    let session = require_inventory(db, inventory_id).await?;
    if session.status != InventoryStatus::InProgress {
        return Err(Error::InventoryClosed {
            inventory_id,
            status: session.status.to_string(),
        });
    }
    Ok(session)
}

fn technician_of(session: &inventory::Model) -> Result<i64> {
    session.technician_id.ok_or_else(|| Error::Config {
        message: format!(
            "Inventory {} counts '{}' but has no technician",
            session.id, session.location
        ),
    })
}

/// Starts a count session at `location`.
///
/// Technician-stock locations need the technician whose stock is counted.
pub async fn start_inventory(
    db: &DatabaseConnection,
    location: &str,
    technician_id: Option<i64>,
) -> Result<inventory::Model> {
    let location = location.trim();
    if location.is_empty() {
        return Err(Error::Config {
            message: "Inventory location cannot be empty".to_string(),
        });
    }

    let technician_id = if LocationKind::is_technician(location) {
        let technician_id = technician_id.ok_or_else(|| Error::Config {
            message: format!("Counting '{location}' requires a technician"),
        })?;
        person::require_person(db, technician_id).await?;
        Some(technician_id)
    } else {
        None
    };

    let session = inventory::ActiveModel {
        date: Set(chrono::Utc::now()),
        location: Set(location.to_string()),
        technician_id: Set(technician_id),
        status: Set(InventoryStatus::InProgress),
        validated_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Started inventory {} at {location}", session.id);
    Ok(session)
}

/// Quantity the system holds for one line of `session`.
async fn system_quantity<C>(
    db: &C,
    session: &inventory::Model,
    article_id: i64,
    serial_number_id: Option<i64>,
) -> Result<i32>
where
    C: ConnectionTrait,
{
    if LocationKind::is_technician(&session.location) {
        let technician_id = technician_of(session)?;
        let row =
            technician_stock::find_row(db, technician_id, article_id, serial_number_id).await?;
        return Ok(row.map_or(0, |row| row.quantity));
    }

    match serial_number_id {
        Some(serial_id) => {
            let at_location = serial_number::Entity::find_by_id(serial_id)
                .filter(serial_number::Column::Location.eq(session.location.as_str()))
                .one(db)
                .await?;
            Ok(i32::from(at_location.is_some()))
        }
        None => match LocationKind::classify(&session.location) {
            LocationKind::Warehouse => {
                Ok(catalog::require_article(db, article_id).await?.stock_quantity)
            }
            _ => Ok(0),
        },
    }
}

/// Records the counted quantity of one article (or unit), replacing any earlier
/// count of the same line. Zero is a valid count.
pub async fn save_inventory_line<C>(
    db: &C,
    inventory_id: i64,
    article_id: i64,
    serial_number_id: Option<i64>,
    counted_quantity: i32,
) -> Result<inventory_line::Model>
where
    C: ConnectionTrait,
{
    if counted_quantity < 0 {
        return Err(Error::InvalidQuantity {
            quantity: counted_quantity,
        });
    }

    let session = require_open(db, inventory_id).await?;
    catalog::require_article(db, article_id).await?;
    let system_quantity = system_quantity(db, &session, article_id, serial_number_id).await?;

    let serial_filter = serial_number_id.map_or_else(
        || inventory_line::Column::SerialNumberId.is_null(),
        |serial_id| inventory_line::Column::SerialNumberId.eq(serial_id),
    );
    let existing = InventoryLine::find()
        .filter(inventory_line::Column::InventoryId.eq(inventory_id))
        .filter(inventory_line::Column::ArticleId.eq(article_id))
        .filter(serial_filter)
        .one(db)
        .await?;

    let line = match existing {
        Some(line) => {
            let mut line: inventory_line::ActiveModel = line.into();
            line.counted_quantity = Set(counted_quantity);
            line.system_quantity = Set(system_quantity);
            line.update(db).await?
        }
        None => {
            inventory_line::ActiveModel {
                inventory_id: Set(inventory_id),
                article_id: Set(article_id),
                serial_number_id: Set(serial_number_id),
                counted_quantity: Set(counted_quantity),
                system_quantity: Set(system_quantity),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    debug!(
        "Inventory {inventory_id}: article {article_id} counted {counted_quantity}, system {system_quantity}"
    );
    Ok(line)
}

/// Saves every line of a counted batch.
pub async fn save_inventory_lines(
    db: &DatabaseConnection,
    inventory_id: i64,
    batch: &WorkingBatch,
) -> Result<Vec<inventory_line::Model>> {
    if batch.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let txn = db.begin().await?;
    let mut saved = Vec::with_capacity(batch.len());
    for line in batch.lines() {
        saved.push(
            save_inventory_line(
                &txn,
                inventory_id,
                line.article_id,
                line.serial_number_id,
                line.quantity,
            )
            .await?,
        );
    }
    txn.commit().await?;
    Ok(saved)
}

/// Lines of a session in entry order.
pub async fn inventory_lines<C>(db: &C, inventory_id: i64) -> Result<Vec<inventory_line::Model>>
where
    C: ConnectionTrait,
{
    InventoryLine::find()
        .filter(inventory_line::Column::InventoryId.eq(inventory_id))
        .order_by_asc(inventory_line::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies one discrepant line to stock.
async fn reconcile_line<C>(
    db: &C,
    session: &inventory::Model,
    line: &inventory_line::Model,
) -> Result<()>
where
    C: ConnectionTrait,
{
    let kind = LocationKind::classify(&session.location);
    let counted = line.counted_quantity;

    match (line.serial_number_id, kind) {
        (None, LocationKind::Technician) => {
            let technician_id = technician_of(session)?;
            technician_stock::set_quantity(db, technician_id, line.article_id, None, counted)
                .await?;
        }
        (None, LocationKind::Warehouse) => {
            let article = catalog::require_article(db, line.article_id).await?;
            if article.serial_tracked {
                warn!(
                    "Skipping bulk count of serial-tracked article {}",
                    article.article_number
                );
            } else {
                catalog::set_stock_quantity(db, article.id, counted).await?;
            }
        }
        (Some(serial_id), LocationKind::Technician) => {
            let technician_id = technician_of(session)?;
            let row =
                technician_stock::find_row(db, technician_id, line.article_id, Some(serial_id))
                    .await?;
            match (row, counted) {
                (None, counted) if counted > 0 => {
                    technician_stock::set_quantity(
                        db,
                        technician_id,
                        line.article_id,
                        Some(serial_id),
                        counted,
                    )
                    .await?;
                }
                (Some(_), 0) => {
                    technician_stock::set_quantity(
                        db,
                        technician_id,
                        line.article_id,
                        Some(serial_id),
                        0,
                    )
                    .await?;
                }
                _ => {}
            }
        }
        _ => debug!(
            "No stock store to correct for line {} at {}",
            line.id, session.location
        ),
    }
    Ok(())
}

/// Validates a session: every line with a discrepancy is applied to stock, then the
/// session is marked validated. Nothing is written unless every line succeeds.
///
/// - Bulk lines at a technician location set the technician's row to the counted
///   quantity (the row is deleted at zero).
/// - Bulk lines at the warehouse overwrite the article's quantity, except for
///   serial-tracked articles.
/// - Unit lines at a technician location create the row when counted and missing,
///   and delete it when counted zero.
#[instrument(skip(db))]
pub async fn validate_inventory(
    db: &DatabaseConnection,
    inventory_id: i64,
) -> Result<inventory::Model> {
    let txn = db.begin().await?;
    let session = require_open(&txn, inventory_id).await?;

    let lines = inventory_lines(&txn, inventory_id).await?;
    let mut corrected = 0;
    for line in lines.iter().filter(|line| line.discrepancy() != 0) {
        reconcile_line(&txn, &session, line).await?;
        corrected += 1;
    }

    let mut active: inventory::ActiveModel = session.into();
    active.status = Set(InventoryStatus::Validated);
    active.validated_at = Set(Some(chrono::Utc::now()));
    let session = active.update(&txn).await?;
    txn.commit().await?;

    info!(
        "Validated inventory {inventory_id}: {corrected} of {} lines corrected",
        lines.len()
    );
    Ok(session)
}

/// Cancels a session without touching stock.
pub async fn cancel_inventory(
    db: &DatabaseConnection,
    inventory_id: i64,
) -> Result<inventory::Model> {
    let session = require_open(db, inventory_id).await?;
    let mut active: inventory::ActiveModel = session.into();
    active.status = Set(InventoryStatus::Cancelled);
    let session = active.update(db).await?;
    info!("Cancelled inventory {inventory_id}");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_discrepancy_spans_full_quantity_range() {
        let line = inventory_line::Model {
            id: 1,
            inventory_id: 1,
            article_id: 1,
            serial_number_id: None,
            counted_quantity: i32::MAX,
            system_quantity: -5,
        };
        assert_eq!(line.discrepancy(), i64::from(i32::MAX) + 5);
    }

    #[tokio::test]
    async fn test_start_inventory_requires_technician_for_technician_stock() -> Result<()> {
        let db = setup_test_db().await?;

        let result = start_inventory(&db, "Stock technicien", None).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = start_inventory(&db, "Stock technicien", Some(42)).await;
        assert!(matches!(
            result,
            Err(Error::PersonNotFound { person_id: 42 })
        ));

        let session = start_inventory(&db, "Entrepot", Some(42)).await?;
        assert_eq!(session.status, InventoryStatus::InProgress);
        assert_eq!(session.technician_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_line_captures_system_quantity() -> Result<()> {
        let db = setup_test_db().await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 12).await?;
        let session = start_inventory(&db, "Entrepot", None).await?;

        let batch = WorkingBatch::new().with_quantity(cable.id, "RJ45-CAT6", 10)?;
        let saved = save_inventory_lines(&db, session.id, &batch).await?;
        assert_eq!(saved[0].system_quantity, 12);
        assert_eq!(saved[0].discrepancy(), -2);

        // Recounting replaces the line
        save_inventory_line(&db, session.id, cable.id, None, 11).await?;
        let lines = inventory_lines(&db, session.id).await?;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].counted_quantity, 11);
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_overwrites_warehouse_quantity() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 12).await?;
        let fibre = create_test_article(&db, "FIBRE-SM", 4).await?;
        let session = start_inventory(&db, "Entrepot", None).await?;
        save_inventory_line(&db, session.id, cable.id, None, 9).await?;
        save_inventory_line(&db, session.id, fibre.id, None, 4).await?;

        // A movement after the count does not change the overwrite target
        catalog::adjust_stock_quantity_atomic(&db, cable.id, 5).await?;

        let session = validate_inventory(&db, session.id).await?;
        assert_eq!(session.status, InventoryStatus::Validated);
        assert!(session.validated_at.is_some());

        assert_eq!(catalog::require_article(&db, cable.id).await?.stock_quantity, 9);
        assert_eq!(catalog::require_article(&db, fibre.id).await?.stock_quantity, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_deletes_counted_zero_serial_row() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let alice = create_test_technician(&db, "Alice", "Martin").await?;
        let modem = create_serial_article(&db, "MODEM-1").await?;
        let unit = create_test_serial(&db, modem.id, "SN-0001", "Stock technicien").await?;
        technician_stock::add_quantity(&db, alice.id, modem.id, Some(unit.id), 3).await?;

        let session = start_inventory(&db, "Stock technicien", Some(alice.id)).await?;
        let line = save_inventory_line(&db, session.id, modem.id, Some(unit.id), 0).await?;
        assert_eq!(line.system_quantity, 3);

        validate_inventory(&db, session.id).await?;
        assert!(
            technician_stock::find_row(&db, alice.id, modem.id, Some(unit.id))
                .await?
                .is_none()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_creates_missing_serial_row() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let alice = create_test_technician(&db, "Alice", "Martin").await?;
        let modem = create_serial_article(&db, "MODEM-1").await?;
        let unit = create_test_serial(&db, modem.id, "SN-0001", "Stock technicien").await?;

        let session = start_inventory(&db, "Stock technicien", Some(alice.id)).await?;
        let batch = WorkingBatch::new().with_serial(modem.id, unit.id, "SN-0001")?;
        save_inventory_lines(&db, session.id, &batch).await?;

        validate_inventory(&db, session.id).await?;
        let row = technician_stock::find_row(&db, alice.id, modem.id, Some(unit.id)).await?;
        assert_eq!(row.map(|r| r.quantity), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_bulk_technician_lines() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let alice = create_test_technician(&db, "Alice", "Martin").await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 50).await?;
        let fibre = create_test_article(&db, "FIBRE-SM", 50).await?;
        technician_stock::add_quantity(&db, alice.id, cable.id, None, 6).await?;
        technician_stock::add_quantity(&db, alice.id, fibre.id, None, 2).await?;

        let session = start_inventory(&db, "Stock technicien", Some(alice.id)).await?;
        save_inventory_line(&db, session.id, cable.id, None, 4).await?;
        save_inventory_line(&db, session.id, fibre.id, None, 0).await?;

        validate_inventory(&db, session.id).await?;
        let cable_row = technician_stock::find_row(&db, alice.id, cable.id, None).await?;
        assert_eq!(cable_row.map(|r| r.quantity), Some(4));
        assert!(
            technician_stock::find_row(&db, alice.id, fibre.id, None)
                .await?
                .is_none()
        );
        // Warehouse quantities are untouched by a technician count
        assert_eq!(catalog::require_article(&db, cable.id).await?.stock_quantity, 50);
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_inventory_rejects_changes() -> Result<()> {
        let db = setup_test_db().await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 12).await?;
        let session = start_inventory(&db, "Entrepot", None).await?;
        cancel_inventory(&db, session.id).await?;

        let result = save_inventory_line(&db, session.id, cable.id, None, 1).await;
        assert!(matches!(result, Err(Error::InventoryClosed { ref status, .. }) if status == "cancelled"));

        let result = validate_inventory(&db, session.id).await;
        assert!(matches!(result, Err(Error::InventoryClosed { .. })));
        assert_eq!(catalog::require_article(&db, cable.id).await?.stock_quantity, 12);

        let result = validate_inventory(&db, 999).await;
        assert!(matches!(
            result,
            Err(Error::InventoryNotFound { inventory_id: 999 })
        ));
        Ok(())
    }
}
