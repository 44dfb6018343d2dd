//! Read-only reporting snapshots for presentation layers.
//!
//! Nothing here mutates the store; the CLI (and any future HTTP surface)
//! renders these types directly.

mod overview;
mod statistics;

pub use overview::{
    CRITICAL_STOCK_UNITS, InventoryOverview, LOW_STOCK_UNITS, StockLevel, inventory_overview,
    recent_donations,
};
pub use statistics::Statistics;
