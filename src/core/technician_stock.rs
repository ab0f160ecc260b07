//! Technician stock business logic.
//!
//! Rows are keyed by (technician, article, serial-or-null) and only exist while
//! their quantity is positive: any change that would leave zero or less deletes
//! the row instead of storing it.

use crate::{
    entities::{TechnicianStock, technician_stock},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, warn};

/// What happened to a technician stock row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowChange {
    /// A new row was created
    Inserted(technician_stock::Model),
    /// An existing row now holds a new quantity
    Updated(technician_stock::Model),
    /// The row reached zero and was removed
    Deleted,
    /// No row existed and none was needed
    Unchanged,
}

/// Finds the row for (technician, article, serial-or-null).
pub async fn find_row<C>(
    db: &C,
    technician_id: i64,
    article_id: i64,
    serial_number_id: Option<i64>,
) -> Result<Option<technician_stock::Model>>
where
    C: ConnectionTrait,
{
    let serial_filter = serial_number_id.map_or_else(
        || technician_stock::Column::SerialNumberId.is_null(),
        |serial_id| technician_stock::Column::SerialNumberId.eq(serial_id),
    );

    TechnicianStock::find()
        .filter(technician_stock::Column::TechnicianId.eq(technician_id))
        .filter(technician_stock::Column::ArticleId.eq(article_id))
        .filter(serial_filter)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn write_quantity<C>(
    db: &C,
    row: technician_stock::Model,
    quantity: i32,
) -> Result<RowChange>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        let row_id = row.id;
        row.delete(db).await?;
        debug!("Deleted technician stock row {row_id}");
        return Ok(RowChange::Deleted);
    }

    let mut active: technician_stock::ActiveModel = row.into();
    active.quantity = Set(quantity);
    active.updated_at = Set(chrono::Utc::now());
    Ok(RowChange::Updated(active.update(db).await?))
}

async fn insert_row<C>(
    db: &C,
    technician_id: i64,
    article_id: i64,
    serial_number_id: Option<i64>,
    quantity: i32,
) -> Result<RowChange>
where
    C: ConnectionTrait,
{
    let row = technician_stock::ActiveModel {
        technician_id: Set(technician_id),
        article_id: Set(article_id),
        serial_number_id: Set(serial_number_id),
        quantity: Set(quantity),
        location: Set(technician_stock::DEFAULT_SUB_LOCATION.to_string()),
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    Ok(RowChange::Inserted(row.insert(db).await?))
}

/// Adds `quantity` to the technician's row, creating it in the vehicle if absent.
///
/// # Errors
/// `InvalidQuantity` if `quantity` is not positive or the new total overflows.
pub async fn add_quantity<C>(
    db: &C,
    technician_id: i64,
    article_id: i64,
    serial_number_id: Option<i64>,
    quantity: i32,
) -> Result<RowChange>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    match find_row(db, technician_id, article_id, serial_number_id).await? {
        Some(row) => {
            let new_quantity = row
                .quantity
                .checked_add(quantity)
                .ok_or(Error::InvalidQuantity { quantity })?;
            write_quantity(db, row, new_quantity).await
        }
        None => insert_row(db, technician_id, article_id, serial_number_id, quantity).await,
    }
}

/// Removes `quantity` from the technician's row.
///
/// The row is deleted when it reaches zero or less. A missing row is left missing:
/// no negative row is ever created.
pub async fn remove_quantity<C>(
    db: &C,
    technician_id: i64,
    article_id: i64,
    serial_number_id: Option<i64>,
    quantity: i32,
) -> Result<RowChange>
where
    C: ConnectionTrait,
{
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    match find_row(db, technician_id, article_id, serial_number_id).await? {
        Some(row) => {
            let new_quantity = row
                .quantity
                .checked_sub(quantity)
                .ok_or(Error::InvalidQuantity { quantity })?;
            write_quantity(db, row, new_quantity).await
        }
        None => {
            warn!(
                "No stock row for technician {technician_id}, article {article_id}, serial {serial_number_id:?}; nothing removed"
            );
            Ok(RowChange::Unchanged)
        }
    }
}

/// Sets the technician's row to exactly `quantity`, deleting it at zero.
pub async fn set_quantity<C>(
    db: &C,
    technician_id: i64,
    article_id: i64,
    serial_number_id: Option<i64>,
    quantity: i32,
) -> Result<RowChange>
where
    C: ConnectionTrait,
{
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    match find_row(db, technician_id, article_id, serial_number_id).await? {
        Some(row) => write_quantity(db, row, quantity).await,
        None if quantity > 0 => {
            insert_row(db, technician_id, article_id, serial_number_id, quantity).await
        }
        None => Ok(RowChange::Unchanged),
    }
}

/// All rows held by a technician, by article then serial.
pub async fn list_for_technician<C>(
    db: &C,
    technician_id: i64,
) -> Result<Vec<technician_stock::Model>>
where
    C: ConnectionTrait,
{
    TechnicianStock::find()
        .filter(technician_stock::Column::TechnicianId.eq(technician_id))
        .order_by_asc(technician_stock::Column::ArticleId)
        .order_by_asc(technician_stock::Column::SerialNumberId)
        .all(db)
        .await
        .map_err(Into::into)
}
