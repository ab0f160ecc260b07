//! Stock reporting business logic.
//!
//! This module computes the stock figures shown to users: the real stock of an
//! article at a location, reorder alerts, and per-article reports. All functions
//! return structured data that the bot layer formats.

use crate::{
    core::{catalog, location::WAREHOUSE_LOCATION, movement::movements_for_article, serial},
    entities::{article, movement},
    errors::Result,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Stock report for one article.
#[derive(Debug, Clone)]
pub struct ArticleReport {
    /// The article being reported on
    pub article: article::Model,
    /// Real stock in the warehouse
    pub real_stock: i32,
    /// Fill level against `stock_maximum`, when a maximum is set
    pub fill_percent: Option<f64>,
    /// Whether the real stock is at or below the reorder point
    pub needs_reorder: bool,
    /// Most recent movements, newest first
    pub recent_movements: Vec<movement::Model>,
}

/// An article to reorder.
#[derive(Debug, Clone)]
pub struct StockAlert {
    /// Article below its reorder point
    pub article: article::Model,
    /// Real warehouse stock
    pub real_stock: i32,
}

impl StockAlert {
    /// Units missing to reach the article's minimum stock.
    #[must_use]
    pub const fn shortfall(&self) -> i32 {
        let missing = self.article.stock_minimum - self.real_stock;
        if missing > 0 { missing } else { 0 }
    }
}

/// Real stock of an article at `location`.
///
/// Serial-tracked articles are counted from their units at that location; their
/// scalar quantity is never used. Other articles use the scalar quantity.
pub async fn real_stock<C>(db: &C, article: &article::Model, location: &str) -> Result<i32>
where
    C: ConnectionTrait,
{
    if article.serial_tracked {
        let units = serial::count_serials_at(db, article.id, location).await?;
        return Ok(i32::try_from(units)?);
    }
    Ok(article.stock_quantity)
}

/// Articles whose real warehouse stock is at or below their reorder point.
pub async fn low_stock_alerts(db: &DatabaseConnection) -> Result<Vec<StockAlert>> {
    let mut alerts = Vec::new();
    for article in catalog::list_articles(db).await? {
        let real_stock = real_stock(db, &article, WAREHOUSE_LOCATION).await?;
        if real_stock <= article.reorder_point {
            alerts.push(StockAlert {
                article,
                real_stock,
            });
        }
    }
    Ok(alerts)
}

/// Generates a stock report for one article.
///
/// # Arguments
/// * `db` - Database connection
/// * `article_id` - ID of the article to report on
/// * `movement_limit` - Maximum number of recent movements to include (default 10)
pub async fn generate_article_report(
    db: &DatabaseConnection,
    article_id: i64,
    movement_limit: Option<u64>,
) -> Result<ArticleReport> {
    let article = catalog::require_article(db, article_id).await?;

    let limit = movement_limit.unwrap_or(10);
    let recent_movements: Vec<movement::Model> = movements_for_article(db, article_id)
        .await?
        .into_iter()
        .take(limit.try_into()?)
        .collect();

    let real_stock = real_stock(db, &article, WAREHOUSE_LOCATION).await?;
    let fill_percent = article
        .stock_maximum
        .filter(|maximum| *maximum > 0)
        .map(|maximum| calculate_fill(real_stock, maximum));
    let needs_reorder = real_stock <= article.reorder_point;

    Ok(ArticleReport {
        article,
        real_stock,
        fill_percent,
        needs_reorder,
        recent_movements,
    })
}

/// Stock level as a percentage of the maximum.
#[must_use]
pub fn calculate_fill(stock: i32, maximum: i32) -> f64 {
    if maximum == 0 {
        return 0.0;
    }
    f64::from(stock) / f64::from(maximum) * 100.0
}

/// Text fill bar like `[████████░░] 80.0%`.
#[must_use]
pub fn format_fill_bar(fill_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = fill_percent.clamp(0.0, 100.0);

    // clamped is in [0, 100] and length is small
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {fill_percent:.1}%",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

/// One-line summary of a movement.
#[must_use]
pub fn format_movement_summary(movement: &movement::Model) -> String {
    let date = movement.moved_at.format("%Y-%m-%d");
    let quantity = movement.quantity;
    let code = &movement.movement_type;
    let origin = &movement.origin_location;
    let destination = &movement.destination_location;

    let summary = format!("{date} | {code} x{quantity} | {origin} → {destination}");
    match movement.remarks.as_deref() {
        Some(remarks) if !remarks.is_empty() => format!("{summary} | {remarks}"),
        _ => summary,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]
    use super::*;
    use crate::core::catalog::update_article_thresholds;
    use crate::test_utils::*;
    use chrono::TimeZone;

    #[test]
    fn test_calculate_fill() {
        assert_eq!(calculate_fill(5, 10), 50.0);
        assert_eq!(calculate_fill(15, 10), 150.0);
        assert_eq!(calculate_fill(5, 0), 0.0);
    }

    #[test]
    fn test_format_fill_bar() {
        assert_eq!(format_fill_bar(100.0, Some(10)), "[██████████] 100.0%");
        assert_eq!(format_fill_bar(50.0, Some(10)), "[█████░░░░░] 50.0%");
        // Overfilled stock is clamped in the bar only
        assert_eq!(format_fill_bar(150.0, Some(4)), "[████] 150.0%");
        assert_eq!(format_fill_bar(0.0, None), "[░░░░░░░░░░] 0.0%");
    }

    #[test]
    fn test_format_movement_summary() {
        let mut movement = movement::Model {
            id: 1,
            article_id: 1,
            serial_number_id: None,
            person_id: None,
            movement_type: "reception".to_string(),
            origin_location: "Fournisseur".to_string(),
            destination_location: "Entrepot".to_string(),
            quantity: 5,
            remarks: None,
            moved_at: chrono::Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
        };
        assert_eq!(
            format_movement_summary(&movement),
            "2026-03-02 | reception x5 | Fournisseur → Entrepot"
        );

        movement.remarks = Some("BL 4411".to_string());
        assert_eq!(
            format_movement_summary(&movement),
            "2026-03-02 | reception x5 | Fournisseur → Entrepot | BL 4411"
        );
    }

    #[tokio::test]
    async fn test_real_stock_counts_units_for_serial_articles() -> Result<()> {
        let db = setup_test_db().await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 12).await?;
        let modem = create_serial_article(&db, "MODEM-1").await?;
        create_test_serial(&db, modem.id, "SN-0001", "Entrepot").await?;
        create_test_serial(&db, modem.id, "SN-0002", "Entrepot").await?;
        create_test_serial(&db, modem.id, "SN-0003", "Stock technicien").await?;

        assert_eq!(real_stock(&db, &cable, "Entrepot").await?, 12);
        assert_eq!(real_stock(&db, &modem, "Entrepot").await?, 2);
        assert_eq!(real_stock(&db, &modem, "Stock technicien").await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_alerts() -> Result<()> {
        let db = setup_test_db().await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 3).await?;
        let fibre = create_test_article(&db, "FIBRE-SM", 40).await?;
        let modem = create_serial_article(&db, "MODEM-1").await?;
        create_test_serial(&db, modem.id, "SN-0001", "Entrepot").await?;
        update_article_thresholds(&db, cable.id, 10, Some(50), 5).await?;
        update_article_thresholds(&db, fibre.id, 10, Some(50), 5).await?;
        update_article_thresholds(&db, modem.id, 4, None, 2).await?;

        let alerts = low_stock_alerts(&db).await?;
        let numbers: Vec<&str> = alerts
            .iter()
            .map(|a| a.article.article_number.as_str())
            .collect();
        assert_eq!(alerts.len(), 2);
        assert!(numbers.contains(&"RJ45-CAT6"));
        assert!(numbers.contains(&"MODEM-1"));

        let cable_alert = alerts
            .iter()
            .find(|a| a.article.id == cable.id)
            .unwrap();
        assert_eq!(cable_alert.shortfall(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_article_report() -> Result<()> {
        let db = setup_test_db().await?;
        let cable = create_test_article(&db, "RJ45-CAT6", 20).await?;
        update_article_thresholds(&db, cable.id, 5, Some(40), 8).await?;

        let report = generate_article_report(&db, cable.id, Some(5)).await?;
        assert_eq!(report.real_stock, 20);
        assert_eq!(report.fill_percent, Some(50.0));
        assert!(!report.needs_reorder);
        assert!(report.recent_movements.is_empty());

        let result = generate_article_report(&db, 404, None).await;
        assert!(matches!(
            result,
            Err(crate::errors::Error::ArticleNotFound { .. })
        ));
        Ok(())
    }
}
