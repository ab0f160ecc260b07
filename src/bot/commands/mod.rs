//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Inventory count commands
pub mod inventory;

/// Scenario and movement commands
pub mod movement;

/// Stock consultation commands
pub mod stock;

// Export commands
pub use general::*;
pub use inventory::*;
pub use movement::*;
pub use stock::*;
