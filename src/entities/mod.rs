//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod article;
pub mod category;
pub mod inventory;
pub mod inventory_line;
pub mod location;
pub mod movement;
pub mod person;
pub mod purchase_order;
pub mod reception;
pub mod scenario;
pub mod serial_number;
pub mod supplier;
pub mod technician_stock;

// Re-export specific types to avoid conflicts
pub use article::{Column as ArticleColumn, Entity as Article, Model as ArticleModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use inventory::{Column as InventoryColumn, Entity as Inventory, Model as InventoryModel};
pub use inventory_line::{
    Column as InventoryLineColumn, Entity as InventoryLine, Model as InventoryLineModel,
};
pub use location::{Column as LocationColumn, Entity as Location, Model as LocationModel};
pub use movement::{Column as MovementColumn, Entity as Movement, Model as MovementModel};
pub use person::{Column as PersonColumn, Entity as Person, Model as PersonModel};
pub use purchase_order::{
    Column as PurchaseOrderColumn, Entity as PurchaseOrder, Model as PurchaseOrderModel,
};
pub use reception::{Column as ReceptionColumn, Entity as Reception, Model as ReceptionModel};
pub use scenario::{Column as ScenarioColumn, Entity as Scenario, Model as ScenarioModel};
pub use serial_number::{
    Column as SerialNumberColumn, Entity as SerialNumber, Model as SerialNumberModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use technician_stock::{
    Column as TechnicianStockColumn, Entity as TechnicianStock, Model as TechnicianStockModel,
};
