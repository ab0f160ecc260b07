//! Core business logic - Framework-agnostic stock operations.
//!
//! Every operation takes a database connection and returns `errors::Result`, so
//! the bot layer (or any other front end) stays a thin formatting shell.

/// Immutable batch of lines being prepared
pub mod batch;
/// Articles, suppliers and categories
pub mod catalog;
/// Inventory count sessions and reconciliation
pub mod inventory;
/// Location classification and reference locations
pub mod location;
/// Movement recording against scenarios
pub mod movement;
/// Canonical movement codes and their stock effects
pub mod movement_type;
/// Technicians and other people
pub mod person;
/// Purchase orders and receptions
pub mod reception;
/// Real stock, alerts and article reports
pub mod report;
/// Scanned code resolution
pub mod scan;
/// The scenario table
pub mod scenario;
/// Serial-tracked units
pub mod serial;
/// Technician stock rows
pub mod technician_stock;
