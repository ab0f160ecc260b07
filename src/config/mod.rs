/// Database configuration and connection management
pub mod database;

/// Locations and movement scenarios loaded from config.toml
pub mod stock;
