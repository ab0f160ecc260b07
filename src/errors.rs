//! Unified error type for the stock service.
//!
//! Every fallible operation returns [`Result`]. Variants carry the offending value
//! so the front end can render a precise message without extra lookups.

use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or free-form validation failure
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Numeric conversion overflow
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),

    /// Discord framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// Quantity that must be strictly positive was not
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// A movement was submitted with no lines
    #[error("The movement contains no lines")]
    EmptyBatch,

    /// A movement was submitted without a movement type
    #[error("No movement type selected")]
    MissingMovementType,

    /// The origin is technician stock but no source technician was chosen
    #[error("A source technician is required when moving out of '{origin}'")]
    MissingSourceTechnician {
        /// Origin location label
        origin: String,
    },

    /// The destination is technician stock but no destination technician was chosen
    #[error("A destination technician is required when moving into '{destination}'")]
    MissingDestinationTechnician {
        /// Destination location label
        destination: String,
    },

    /// Technician-to-technician transfer with identical source and destination
    #[error("Source and destination technician must differ (technician {technician_id})")]
    SameTechnician {
        /// The technician chosen on both sides
        technician_id: i64,
    },

    /// Article lookup failed
    #[error("Article not found: {reference}")]
    ArticleNotFound {
        /// Id or article number that was looked up
        reference: String,
    },

    /// Serial number lookup failed
    #[error("Serial number not found: {reference}")]
    SerialNotFound {
        /// Id or serial string that was looked up
        reference: String,
    },

    /// Person lookup failed
    #[error("Person not found: {person_id}")]
    PersonNotFound {
        /// Id that was looked up
        person_id: i64,
    },

    /// Inventory session lookup failed
    #[error("Inventory not found: {inventory_id}")]
    InventoryNotFound {
        /// Id that was looked up
        inventory_id: i64,
    },

    /// No scenario matches the origin and movement type
    #[error("No scenario for movement type '{movement_type}' from '{origin}'")]
    ScenarioNotFound {
        /// Origin location label
        origin: String,
        /// Movement type label
        movement_type: String,
    },

    /// Purchase order lookup failed
    #[error("Purchase order not found: {order_id}")]
    PurchaseOrderNotFound {
        /// Id that was looked up
        order_id: i64,
    },

    /// A scanned or typed code matched neither a serial nor an article
    #[error("No serial number or article matches '{code}'")]
    UnknownCode {
        /// The unresolved code
        code: String,
    },

    /// The same serial unit was scanned twice in one batch
    #[error("Serial number '{serial}' has already been scanned")]
    AlreadyScanned {
        /// Serial label of the duplicate unit
        serial: String,
    },

    /// Transfer scan of a unit the source technician does not hold
    #[error("Serial number '{serial}' is not in technician {technician_id}'s stock")]
    NotInSourceStock {
        /// Serial label of the rejected unit
        serial: String,
        /// Source technician
        technician_id: i64,
    },

    /// Bulk entry of an article that has individual serial records
    #[error("Article '{article_number}' is tracked by serial number; scan each unit")]
    SerialScanRequired {
        /// Article number that was scanned
        article_number: String,
    },

    /// Article number already used by another article
    #[error("Article number '{article_number}' already exists")]
    DuplicateArticleNumber {
        /// The conflicting article number
        article_number: String,
    },

    /// Mutation of an inventory session that is no longer in progress
    #[error("Inventory {inventory_id} is {status} and can no longer be changed")]
    InventoryClosed {
        /// Session id
        inventory_id: i64,
        /// Current status
        status: String,
    },

    /// Reception against a fully received purchase order
    #[error("Purchase order {order_id} is already fully received")]
    OrderClosed {
        /// Order id
        order_id: i64,
    },
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
