//! Movement Recorder - Commits a batch of lines against a resolved scenario.
//!
//! One call writes one movement log row per line and applies the line to every
//! stock store it touches: the article's warehouse quantity, the unit's location,
//! and the source and destination technicians' stock rows. The whole batch runs
//! inside a single database transaction, so a failing line leaves nothing behind.

use crate::{
    core::{
        batch::WorkingBatch,
        catalog,
        location::LocationKind,
        movement_type::{self, StockEffect},
        person, scenario,
        scenario::ScenarioResolution,
        serial, technician_stock,
    },
    entities::{Movement, movement},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// Everything the user entered for a movement, besides the scenario.
#[derive(Debug, Clone, Default)]
pub struct MovementRequest {
    /// Technician the goods leave from, required when the origin is technician stock
    pub source_technician_id: Option<i64>,
    /// Technician receiving the goods, required when the destination is technician stock
    pub destination_technician_id: Option<i64>,
    /// Free-text remarks
    pub remarks: Option<String>,
    /// Lines to move
    pub batch: WorkingBatch,
}

/// Result of a committed movement.
#[derive(Debug, Clone)]
pub struct MovementReceipt {
    /// Inserted log rows, one per batch line
    pub movements: Vec<movement::Model>,
    /// Canonical movement code written to the log
    pub movement_code: String,
    /// Effect applied to warehouse quantities
    pub stock_effect: StockEffect,
}

/// Checks the request before anything is written.
///
/// # Errors
/// `EmptyBatch`, `MissingMovementType`, `MissingSourceTechnician`,
/// `MissingDestinationTechnician` or `SameTechnician`.
pub fn validate_request(resolution: &ScenarioResolution, request: &MovementRequest) -> Result<()> {
    if request.batch.is_empty() {
        return Err(Error::EmptyBatch);
    }
    if resolution.movement_type().trim().is_empty() {
        return Err(Error::MissingMovementType);
    }

    let origin = resolution.origin();
    let destination = resolution.destination();
    let origin_is_technician = LocationKind::is_technician(origin);
    let destination_is_technician = LocationKind::is_technician(destination);

    if origin_is_technician && request.source_technician_id.is_none() {
        return Err(Error::MissingSourceTechnician {
            origin: origin.to_string(),
        });
    }
    if destination_is_technician && request.destination_technician_id.is_none() {
        return Err(Error::MissingDestinationTechnician {
            destination: destination.to_string(),
        });
    }
    if origin_is_technician && destination_is_technician {
        if let (Some(source), Some(target)) = (
            request.source_technician_id,
            request.destination_technician_id,
        ) {
            if source == target {
                return Err(Error::SameTechnician {
                    technician_id: source,
                });
            }
        }
    }
    Ok(())
}

/// Remarks for a transfer between two technicians: an automatic note, followed by
/// the user's remarks when there are any.
#[must_use]
pub fn transfer_note(source_name: &str, destination_name: &str, remarks: Option<&str>) -> String {
    let note = format!("Transfert : {source_name} → {destination_name}");
    match remarks.map(str::trim).filter(|r| !r.is_empty()) {
        Some(remarks) => format!("{note} - {remarks}"),
        None => note,
    }
}

/// Records a movement batch and applies it to stock.
///
/// For each line, in order:
/// 1. a movement row is inserted with the canonical code and the acting technician
///    (destination technician if any, else source technician);
/// 2. the article's warehouse quantity changes by the code's stock effect, except for
///    serial-tracked articles whose quantity stays at zero;
/// 3. a unit line moves the unit to the destination;
/// 4. technician-stock origins lose the quantity (row deleted at zero, no-op if absent);
/// 5. technician-stock destinations gain it (row created in the vehicle if absent).
///
/// An unresolved scenario is accepted and uses the movement type label as the
/// destination.
#[instrument(skip_all, fields(origin = %resolution.origin(), movement_type = %resolution.movement_type()))]
pub async fn record_movement(
    db: &DatabaseConnection,
    resolution: &ScenarioResolution,
    request: &MovementRequest,
) -> Result<MovementReceipt> {
    validate_request(resolution, request)?;
    if !resolution.is_resolved() {
        warn!("No scenario configured; using the movement type as destination");
    }

    let raw_type = resolution.movement_type().trim();
    let movement_code = movement_type::canonicalize(raw_type);
    let origin = resolution.origin();
    let destination = resolution.destination();
    let source = request
        .source_technician_id
        .filter(|_| LocationKind::is_technician(origin));
    let target = request
        .destination_technician_id
        .filter(|_| LocationKind::is_technician(destination));

    let txn = db.begin().await?;

    let stock_effect = scenario::load_stock_effects(&txn)
        .await?
        .effect_for(&movement_code, raw_type);

    let remarks = match (source, target) {
        (Some(source_id), Some(target_id)) => {
            let source_person = person::require_person(&txn, source_id).await?;
            let target_person = person::require_person(&txn, target_id).await?;
            Some(transfer_note(
                &source_person.display_name(),
                &target_person.display_name(),
                request.remarks.as_deref(),
            ))
        }
        _ => {
            for technician_id in source.iter().chain(target.iter()) {
                person::require_person(&txn, *technician_id).await?;
            }
            request
                .remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
        }
    };
    let actor = target.or(source);
    let now = chrono::Utc::now();

    let mut movements = Vec::with_capacity(request.batch.len());
    for line in request.batch.lines() {
        if line.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }
        let article = catalog::require_article(&txn, line.article_id).await?;

        let row = movement::ActiveModel {
            article_id: Set(article.id),
            serial_number_id: Set(line.serial_number_id),
            person_id: Set(actor),
            movement_type: Set(movement_code.clone()),
            origin_location: Set(origin.to_string()),
            destination_location: Set(destination.to_string()),
            quantity: Set(line.quantity),
            remarks: Set(remarks.clone()),
            moved_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        movements.push(row);

        let delta = stock_effect.delta(line.quantity);
        if delta != 0 && !article.serial_tracked {
            let updated = catalog::adjust_stock_quantity_atomic(&txn, article.id, delta).await?;
            if updated.stock_quantity < 0 {
                warn!(
                    "Warehouse stock of {} is now negative ({})",
                    updated.article_number, updated.stock_quantity
                );
            }
        }

        if let Some(serial_id) = line.serial_number_id {
            if !destination.trim().is_empty() {
                serial::relocate_serial(&txn, serial_id, destination).await?;
            }
        }

        if let Some(source_id) = source {
            technician_stock::remove_quantity(
                &txn,
                source_id,
                article.id,
                line.serial_number_id,
                line.quantity,
            )
            .await?;
        }

        if let Some(target_id) = target {
            technician_stock::add_quantity(
                &txn,
                target_id,
                article.id,
                line.serial_number_id,
                line.quantity,
            )
            .await?;
        }
    }

    txn.commit().await?;
    info!(
        "Recorded {} movement lines as '{movement_code}' from {origin} to {destination}",
        movements.len()
    );

    Ok(MovementReceipt {
        movements,
        movement_code,
        stock_effect,
    })
}

/// Movements of an article, newest first.
pub async fn movements_for_article<C>(db: &C, article_id: i64) -> Result<Vec<movement::Model>>
where
    C: ConnectionTrait,
{
    Movement::find()
        .filter(movement::Column::ArticleId.eq(article_id))
        .order_by_desc(movement::Column::MovedAt)
        .order_by_desc(movement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Movements of a single unit, oldest first, for traceability.
pub async fn movements_for_serial<C>(db: &C, serial_number_id: i64) -> Result<Vec<movement::Model>>
where
    C: ConnectionTrait,
{
    Movement::find()
        .filter(movement::Column::SerialNumberId.eq(serial_number_id))
        .order_by_asc(movement::Column::MovedAt)
        .order_by_asc(movement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
