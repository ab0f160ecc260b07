//! Stock configuration loading from config.toml
//!
//! The configuration file declares the reference locations and the Scenario Table.
//! Both are seeded into the database at start-up; entries already present in the
//! database are left untouched, so edits made by users are never overwritten.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct StockConfig {
    /// Reference locations to seed
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
    /// Movement scenarios to seed
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

/// Configuration for a single location
#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    /// Location label (e.g., "Entrepot", "Stock technicien")
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Configuration for a single movement scenario
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    /// Origin location label
    pub origin: String,
    /// Movement type label as shown to users
    pub movement_type: String,
    /// Destination location label
    pub destination: String,
    /// Participant expected (`"technicien"`, `"client"`, ...)
    #[serde(default)]
    pub participant: Option<String>,
    /// What happens at the origin
    #[serde(default)]
    pub origin_action: Option<String>,
    /// What happens at the destination
    #[serde(default)]
    pub destination_action: Option<String>,
    /// One-line description
    #[serde(default)]
    pub summary: Option<String>,
    /// Explicit warehouse stock effect: `"increase"`, `"decrease"` or `"none"`
    #[serde(default)]
    pub effect: Option<String>,
}

/// Loads the stock configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StockConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the stock configuration from `STOCK_BUDDY_CONFIG`, or ./config.toml
pub fn load_default_config() -> Result<StockConfig> {
    let path = std::env::var("STOCK_BUDDY_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_stock_config() {
        let toml_str = r#"
            [[locations]]
            name = "Entrepot"
            description = "Central warehouse"

            [[locations]]
            name = "Stock technicien"

            [[scenarios]]
            origin = "Entrepot"
            movement_type = "Sortie technicien"
            destination = "Stock technicien"
            participant = "technicien"
            summary = "Equip a technician"

            [[scenarios]]
            origin = "Fournisseur"
            movement_type = "Réception"
            destination = "Entrepot"
            effect = "increase"
        "#;

        let config: StockConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.locations.len(), 2);
        assert_eq!(config.locations[0].name, "Entrepot");
        assert!(config.locations[1].description.is_none());

        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenarios[0].destination, "Stock technicien");
        assert_eq!(config.scenarios[0].participant.as_deref(), Some("technicien"));
        assert!(config.scenarios[0].effect.is_none());
        assert_eq!(config.scenarios[1].effect.as_deref(), Some("increase"));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: StockConfig = toml::from_str("").unwrap();
        assert!(config.locations.is_empty());
        assert!(config.scenarios.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
