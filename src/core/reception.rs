//! Purchase orders and their receptions.
//!
//! Receiving goods is a movement from the supplier into the warehouse: the
//! delivered units are registered, the warehouse quantity grows for bulk articles,
//! and the order tracks how much is still outstanding.

use crate::{
    core::{
        catalog,
        location::{SUPPLIER_LOCATION, WAREHOUSE_LOCATION},
        movement_type, serial,
    },
    entities::{
        PurchaseOrder, Reception, Supplier, movement,
        purchase_order::{self, OrderStatus},
        reception,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Places an order for `quantity` of an article.
pub async fn create_purchase_order(
    db: &DatabaseConnection,
    supplier_id: i64,
    article_id: i64,
    quantity: i32,
) -> Result<purchase_order::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    if Supplier::find_by_id(supplier_id).one(db).await?.is_none() {
        return Err(Error::Config {
            message: format!("Supplier {supplier_id} does not exist"),
        });
    }
    let article = catalog::require_article(db, article_id).await?;

    let order = purchase_order::ActiveModel {
        supplier_id: Set(supplier_id),
        article_id: Set(article.id),
        quantity_ordered: Set(quantity),
        quantity_received: Set(0),
        status: Set(OrderStatus::Open),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Created purchase order {} for {quantity} x {}",
        order.id, article.article_number
    );
    Ok(order)
}

/// Finds an order by ID, failing with `PurchaseOrderNotFound` if absent.
pub async fn require_purchase_order<C>(db: &C, order_id: i64) -> Result<purchase_order::Model>
where
    C: ConnectionTrait,
{
    PurchaseOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::PurchaseOrderNotFound { order_id })
}

/// Receives `quantity` against an order.
///
/// Serial-tracked articles need exactly one serial per received unit; each is
/// registered in the warehouse and logged as its own movement line. Bulk articles
/// take no serials and are logged as one line that raises the warehouse quantity.
#[instrument(skip(db, serials))]
pub async fn receive_purchase_order(
    db: &DatabaseConnection,
    order_id: i64,
    quantity: i32,
    serials: &[String],
) -> Result<purchase_order::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;
    let order = require_purchase_order(&txn, order_id).await?;
    if order.status == OrderStatus::Received {
        return Err(Error::OrderClosed { order_id });
    }
    if quantity > order.outstanding() {
        return Err(Error::Config {
            message: format!(
                "Receiving {quantity} exceeds the {} still expected on order {order_id}",
                order.outstanding()
            ),
        });
    }

    let article = catalog::require_article(&txn, order.article_id).await?;
    let expected_serials = if article.serial_tracked {
        usize::try_from(quantity)?
    } else {
        0
    };
    if serials.len() != expected_serials {
        return Err(Error::Config {
            message: format!(
                "{} expects {expected_serials} serial numbers, got {}",
                article.article_number,
                serials.len()
            ),
        });
    }

    let now = chrono::Utc::now();
    let code = movement_type::canonicalize("Réception");
    let remarks = Some(format!("Bon de commande {order_id}"));
    let log_line = |serial_number_id: Option<i64>, line_quantity: i32| movement::ActiveModel {
        article_id: Set(article.id),
        serial_number_id: Set(serial_number_id),
        person_id: Set(None),
        movement_type: Set(code.clone()),
        origin_location: Set(SUPPLIER_LOCATION.to_string()),
        destination_location: Set(WAREHOUSE_LOCATION.to_string()),
        quantity: Set(line_quantity),
        remarks: Set(remarks.clone()),
        moved_at: Set(now),
        ..Default::default()
    };

    if article.serial_tracked {
        for value in serials {
            let unit = serial::register_serial(
                &txn,
                article.id,
                Some(value.clone()),
                None,
                WAREHOUSE_LOCATION,
            )
            .await?;
            log_line(Some(unit.id), 1).insert(&txn).await?;
        }
    } else {
        log_line(None, quantity).insert(&txn).await?;
        catalog::adjust_stock_quantity_atomic(&txn, article.id, quantity).await?;
    }

    reception::ActiveModel {
        purchase_order_id: Set(order_id),
        quantity: Set(quantity),
        received_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let received = order.quantity_received + quantity;
    let status = if received >= order.quantity_ordered {
        OrderStatus::Received
    } else {
        OrderStatus::PartiallyReceived
    };
    let mut active: purchase_order::ActiveModel = order.into();
    active.quantity_received = Set(received);
    active.status = Set(status);
    let order = active.update(&txn).await?;
    txn.commit().await?;

    info!(
        "Received {quantity} x {} on order {order_id} ({received}/{})",
        article.article_number, order.quantity_ordered
    );
    Ok(order)
}

/// Receptions of an order, oldest first.
pub async fn receptions_for_order<C>(db: &C, order_id: i64) -> Result<Vec<reception::Model>>
where
    C: ConnectionTrait,
{
    Reception::find()
        .filter(reception::Column::PurchaseOrderId.eq(order_id))
        .order_by_asc(reception::Column::ReceivedAt)
        .order_by_asc(reception::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{movement::movements_for_article, serial::count_serials_at};
    use crate::test_utils::*;

    async fn acme(db: &DatabaseConnection) -> Result<i64> {
        let supplier = catalog::create_supplier(db, "Acme".to_string(), None, None, None).await?;
        Ok(supplier.id)
    }

    #[tokio::test]
    async fn test_create_purchase_order_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier_id = acme(&db).await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 0).await?;

        let result = create_purchase_order(&db, supplier_id, cable.id, 0).await;
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: 0 })));

        let result = create_purchase_order(&db, 99, cable.id, 5).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = create_purchase_order(&db, supplier_id, 99, 5).await;
        assert!(matches!(result, Err(Error::ArticleNotFound { .. })));

        let order = create_purchase_order(&db, supplier_id, cable.id, 5).await?;
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.outstanding(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_partial_then_full_bulk_reception() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let supplier_id = acme(&db).await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 2).await?;
        let order = create_purchase_order(&db, supplier_id, cable.id, 10).await?;

        let order = receive_purchase_order(&db, order.id, 4, &[]).await?;
        assert_eq!(order.status, OrderStatus::PartiallyReceived);
        assert_eq!(catalog::require_article(&db, cable.id).await?.stock_quantity, 6);

        let order = receive_purchase_order(&db, order.id, 6, &[]).await?;
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.quantity_received, 10);
        assert_eq!(catalog::require_article(&db, cable.id).await?.stock_quantity, 12);

        let history = movements_for_article(&db, cable.id).await?;
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.movement_type == "reception"));
        assert_eq!(receptions_for_order(&db, order.id).await?.len(), 2);

        let result = receive_purchase_order(&db, order.id, 1, &[]).await;
        assert!(matches!(result, Err(Error::OrderClosed { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_serial_reception_registers_units() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let supplier_id = acme(&db).await?;
        let modem = create_serial_article(&db, "MODEM-1").await?;
        let order = create_purchase_order(&db, supplier_id, modem.id, 2).await?;

        let result = receive_purchase_order(&db, order.id, 2, &["SN-A".to_string()]).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let serials = vec!["SN-A".to_string(), "SN-B".to_string()];
        let order = receive_purchase_order(&db, order.id, 2, &serials).await?;
        assert_eq!(order.status, OrderStatus::Received);

        assert_eq!(count_serials_at(&db, modem.id, WAREHOUSE_LOCATION).await?, 2);
        assert_eq!(catalog::require_article(&db, modem.id).await?.stock_quantity, 0);
        assert_eq!(movements_for_article(&db, modem.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_reception_rolls_back() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let supplier_id = acme(&db).await?;
        let modem = create_serial_article(&db, "MODEM-1").await?;
        create_test_serial(&db, modem.id, "SN-B", "Client").await?;
        let order = create_purchase_order(&db, supplier_id, modem.id, 2).await?;

        // The second serial is already registered
        let serials = vec!["SN-A".to_string(), "SN-B".to_string()];
        let result = receive_purchase_order(&db, order.id, 2, &serials).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        assert_eq!(count_serials_at(&db, modem.id, WAREHOUSE_LOCATION).await?, 0);
        assert!(movements_for_article(&db, modem.id).await?.is_empty());
        let order = require_purchase_order(&db, order.id).await?;
        assert_eq!(order.status, OrderStatus::Open);
        Ok(())
    }

    #[tokio::test]
    async fn test_over_reception_rejected() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let supplier_id = acme(&db).await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 0).await?;
        let order = create_purchase_order(&db, supplier_id, cable.id, 3).await?;

        let result = receive_purchase_order(&db, order.id, 4, &[]).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = receive_purchase_order(&db, 77, 1, &[]).await;
        assert!(matches!(
            result,
            Err(Error::PurchaseOrderNotFound { order_id: 77 })
        ));
        Ok(())
    }
}
