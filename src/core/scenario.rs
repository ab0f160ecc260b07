//! Scenario Table - Legal (origin, movement type) pairs and what they imply.
//!
//! Scenarios constrain movement entry: the origin is chosen first, then one of the
//! movement types configured for it, which in turn fixes the destination and the
//! participant expected. Lookups are pure reads over a small configuration set.

use crate::{
    config::stock::ScenarioConfig,
    core::movement_type::{StockEffect, StockEffects},
    entities::{Scenario, scenario},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Outcome of looking up a scenario by origin and movement type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioResolution {
    /// A configured scenario matches
    Resolved(scenario::Model),
    /// Nothing matches; the raw inputs are kept so callers can decide
    Unresolved {
        /// Origin location label as given
        origin: String,
        /// Movement type label as given
        movement_type: String,
    },
}

impl ScenarioResolution {
    /// Origin location label.
    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Self::Resolved(scenario) => &scenario.origin,
            Self::Unresolved { origin, .. } => origin,
        }
    }

    /// Movement type label as shown to users.
    #[must_use]
    pub fn movement_type(&self) -> &str {
        match self {
            Self::Resolved(scenario) => &scenario.movement_type,
            Self::Unresolved { movement_type, .. } => movement_type,
        }
    }

    /// Destination location label.
    ///
    /// An unresolved lookup falls back to the movement type label itself as the
    /// destination context.
    #[must_use]
    pub fn destination(&self) -> &str {
        match self {
            Self::Resolved(scenario) => &scenario.destination,
            Self::Unresolved { movement_type, .. } => movement_type,
        }
    }

    /// Participant expected, if the scenario names one.
    #[must_use]
    pub fn participant_type(&self) -> Option<&str> {
        match self {
            Self::Resolved(scenario) => scenario.participant_type.as_deref(),
            Self::Unresolved { .. } => None,
        }
    }

    /// Whether a configured scenario matched.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the matched scenario, or `ScenarioNotFound`.
    pub fn require(self) -> Result<scenario::Model> {
        match self {
            Self::Resolved(scenario) => Ok(scenario),
            Self::Unresolved {
                origin,
                movement_type,
            } => Err(Error::ScenarioNotFound {
                origin,
                movement_type,
            }),
        }
    }
}

/// Retrieves every scenario, ordered by origin then movement type.
pub async fn get_all_scenarios<C>(db: &C) -> Result<Vec<scenario::Model>>
where
    C: ConnectionTrait,
{
    Scenario::find()
        .order_by_asc(scenario::Column::Origin)
        .order_by_asc(scenario::Column::MovementType)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Distinct configured origins, sorted alphabetically.
pub async fn list_origins(db: &DatabaseConnection) -> Result<Vec<String>> {
    let mut origins: Vec<String> = get_all_scenarios(db)
        .await?
        .into_iter()
        .map(|scenario| scenario.origin)
        .collect();
    origins.dedup();
    Ok(origins)
}

/// Scenarios available from `origin`, each carrying its destination and participant hint.
pub async fn list_types_for_origin(
    db: &DatabaseConnection,
    origin: &str,
) -> Result<Vec<scenario::Model>> {
    Scenario::find()
        .filter(scenario::Column::Origin.eq(origin))
        .order_by_asc(scenario::Column::MovementType)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up the scenario matching both `origin` and `movement_type`.
pub async fn resolve<C>(db: &C, origin: &str, movement_type: &str) -> Result<ScenarioResolution>
where
    C: ConnectionTrait,
{
    let found = Scenario::find()
        .filter(scenario::Column::Origin.eq(origin))
        .filter(scenario::Column::MovementType.eq(movement_type))
        .order_by_asc(scenario::Column::Id)
        .one(db)
        .await?;

    Ok(found.map_or_else(
        || ScenarioResolution::Unresolved {
            origin: origin.to_string(),
            movement_type: movement_type.to_string(),
        },
        ScenarioResolution::Resolved,
    ))
}

/// Builds the stock effect table from the scenarios currently configured.
pub async fn load_stock_effects<C>(db: &C) -> Result<StockEffects>
where
    C: ConnectionTrait,
{
    let scenarios = get_all_scenarios(db).await?;
    Ok(StockEffects::from_scenarios(&scenarios))
}

/// Creates a scenario after validating its labels and effect.
pub async fn create_scenario(
    db: &DatabaseConnection,
    config: &ScenarioConfig,
) -> Result<scenario::Model> {
    for (field, value) in [
        ("origin", &config.origin),
        ("movement type", &config.movement_type),
        ("destination", &config.destination),
    ] {
        if value.trim().is_empty() {
            return Err(Error::Config {
                message: format!("Scenario {field} cannot be empty"),
            });
        }
    }

    if let Some(effect) = config.effect.as_deref() {
        if StockEffect::parse(effect).is_none() {
            return Err(Error::Config {
                message: format!("Unknown stock effect '{effect}'"),
            });
        }
    }

    let scenario = scenario::ActiveModel {
        origin: Set(config.origin.trim().to_string()),
        movement_type: Set(config.movement_type.trim().to_string()),
        destination: Set(config.destination.trim().to_string()),
        participant_type: Set(config.participant.clone()),
        origin_action: Set(config.origin_action.clone()),
        destination_action: Set(config.destination_action.clone()),
        summary: Set(config.summary.clone()),
        stock_effect: Set(config.effect.clone()),
        ..Default::default()
    };
    scenario.insert(db).await.map_err(Into::into)
}

/// Inserts configured scenarios whose (origin, movement type) pair is not present yet.
///
/// Returns the number of scenarios inserted.
pub async fn seed_scenarios(db: &DatabaseConnection, scenarios: &[ScenarioConfig]) -> Result<usize> {
    let mut inserted = 0;
    for config in scenarios {
        if resolve(db, config.origin.trim(), config.movement_type.trim())
            .await?
            .is_resolved()
        {
            continue;
        }
        create_scenario(db, config).await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!("Seeded {inserted} movement scenarios");
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_scenario_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut config = scenario_config("Entrepot", "Sortie technicien", "Stock technicien");
        config.destination = "   ".to_string();
        let result = create_scenario(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let mut config = scenario_config("Entrepot", "Sortie technicien", "Stock technicien");
        config.effect = Some("sideways".to_string());
        let result = create_scenario(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_origins_is_distinct_and_sorted() -> Result<()> {
        let db = setup_with_scenarios().await?;

        let origins = list_origins(&db).await?;
        assert_eq!(origins, vec!["Entrepot", "Fournisseur", "Stock technicien"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_types_for_origin() -> Result<()> {
        let db = setup_with_scenarios().await?;

        let types = list_types_for_origin(&db, "Entrepot").await?;
        let labels: Vec<&str> = types.iter().map(|s| s.movement_type.as_str()).collect();
        assert_eq!(labels, vec!["Sortie technicien", "Transfert dépôt", "réception"]);
        assert_eq!(types[0].destination, "Stock technicien");
        assert_eq!(types[0].participant_type.as_deref(), Some("technicien"));

        assert!(list_types_for_origin(&db, "Nowhere").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_found() -> Result<()> {
        let db = setup_with_scenarios().await?;

        let resolution = resolve(&db, "Entrepot", "Sortie technicien").await?;
        assert!(resolution.is_resolved());
        assert_eq!(resolution.destination(), "Stock technicien");
        assert_eq!(resolution.participant_type(), Some("technicien"));
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_is_deterministic() -> Result<()> {
        let db = setup_with_scenarios().await?;

        let first = resolve(&db, "Stock technicien", "Transfert technicien").await?;
        let second = resolve(&db, "Stock technicien", "Transfert technicien").await?;
        assert_eq!(first, second);
        assert_eq!(first.destination(), second.destination());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_not_found_falls_back_to_type() -> Result<()> {
        let db = setup_with_scenarios().await?;

        let resolution = resolve(&db, "Entrepot", "Prêt").await?;
        assert!(!resolution.is_resolved());
        assert_eq!(resolution.origin(), "Entrepot");
        assert_eq!(resolution.destination(), "Prêt");
        assert!(matches!(
            resolution.require(),
            Err(Error::ScenarioNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_scenarios_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let configs = vec![
            scenario_config("Entrepot", "Sortie technicien", "Stock technicien"),
            scenario_config("Fournisseur", "Réception", "Entrepot"),
        ];

        assert_eq!(seed_scenarios(&db, &configs).await?, 2);
        assert_eq!(seed_scenarios(&db, &configs).await?, 0);
        assert_eq!(get_all_scenarios(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_stock_effects_uses_scenario_overrides() -> Result<()> {
        let db = setup_test_db().await?;
        let mut config = scenario_config("Entrepot", "Mise au rebut", "Rebut");
        config.effect = Some("decrease".to_string());
        create_scenario(&db, &config).await?;

        let effects = load_stock_effects(&db).await?;
        assert_eq!(
            effects.effect_for("rebut", "Mise au rebut"),
            StockEffect::Decrease
        );
        Ok(())
    }
}
