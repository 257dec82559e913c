// Inventory Keeper - Core Library
// Exposes the store, operations and menu driver for the binary and tests

pub mod config;
pub mod error;
pub mod inventory;
pub mod menu;
pub mod record;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use config::{Cli, Config};
pub use error::{InventoryError, RowError};
pub use inventory::{Inventory, ItemValue};
pub use menu::{open_inventory, MenuChoice, Session};
pub use record::{Field, Record};
pub use render::{records_table, values_table, TableData};
pub use store::{load, save, LoadReport, RejectedRow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
