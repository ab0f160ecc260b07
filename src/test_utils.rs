//! Shared test utilities for `StockBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::stock::ScenarioConfig,
    core::{catalog, person, scenario, serial},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Creates a bulk-counted test article.
///
/// # Defaults
/// * name: "Article `<number>`"
/// * thresholds: 0, no maximum
pub async fn create_test_article(
    db: &DatabaseConnection,
    article_number: &str,
    stock_quantity: i32,
) -> Result<entities::article::Model> {
    catalog::create_article(
        db,
        catalog::NewArticle {
            name: format!("Article {article_number}"),
            article_number: article_number.to_string(),
            stock_quantity,
            ..Default::default()
        },
    )
    .await
}

/// Creates a serial-tracked test article (scalar quantity 0).
pub async fn create_serial_article(
    db: &DatabaseConnection,
    article_number: &str,
) -> Result<entities::article::Model> {
    catalog::create_article(
        db,
        catalog::NewArticle {
            name: format!("Article {article_number}"),
            article_number: article_number.to_string(),
            serial_tracked: true,
            ..Default::default()
        },
    )
    .await
}

/// Registers a unit by serial string at `location`.
pub async fn create_test_serial(
    db: &DatabaseConnection,
    article_id: i64,
    serial_number: &str,
    location: &str,
) -> Result<entities::serial_number::Model> {
    serial::register_serial(db, article_id, Some(serial_number.to_string()), None, location)
        .await
}

/// Creates an active technician.
pub async fn create_test_technician(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<entities::person::Model> {
    person::create_person(
        db,
        first_name.to_string(),
        last_name.to_string(),
        entities::person::TECHNICIAN_ROLE.to_string(),
    )
    .await
}

/// Builds a scenario configuration with no participant hint and no explicit effect.
#[must_use]
pub fn scenario_config(origin: &str, movement_type: &str, destination: &str) -> ScenarioConfig {
    ScenarioConfig {
        origin: origin.to_string(),
        movement_type: movement_type.to_string(),
        destination: destination.to_string(),
        participant: None,
        origin_action: None,
        destination_action: None,
        summary: None,
        effect: None,
    }
}

/// Sets up a test database seeded with a small scenario table:
///
/// | origin           | type                 | destination      |
/// |------------------|----------------------|------------------|
/// | Entrepot         | réception            | Entrepot         |
/// | Entrepot         | Sortie technicien    | Stock technicien |
/// | Entrepot         | Transfert dépôt      | Dépôt Nord       |
/// | Fournisseur      | Réception            | Entrepot         |
/// | Stock technicien | Installation         | Client           |
/// | Stock technicien | Retour technicien    | Entrepot         |
/// | Stock technicien | Transfert technicien | Stock technicien |
pub async fn setup_with_scenarios() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;

    let mut issue = scenario_config("Entrepot", "Sortie technicien", "Stock technicien");
    issue.participant = Some("technicien".to_string());
    let mut transfer = scenario_config("Stock technicien", "Transfert technicien", "Stock technicien");
    transfer.participant = Some("technicien".to_string());

    let configs = vec![
        scenario_config("Entrepot", "réception", "Entrepot"),
        issue,
        scenario_config("Entrepot", "Transfert dépôt", "Dépôt Nord"),
        scenario_config("Fournisseur", "Réception", "Entrepot"),
        scenario_config("Stock technicien", "Installation", "Client"),
        scenario_config("Stock technicien", "Retour technicien", "Entrepot"),
        transfer,
    ];
    scenario::seed_scenarios(&db, &configs).await?;
    Ok(db)
}
