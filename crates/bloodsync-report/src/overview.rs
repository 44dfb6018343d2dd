//! Per-group inventory snapshots with stock-level classification.

use serde::Serialize;

use bloodsync_model::{BloodGroup, Donation};
use bloodsync_store::{Result, Store};

/// Below this many units a group's stock is critical.
pub const CRITICAL_STOCK_UNITS: u32 = 20;
/// Below this many units (but at or above critical) a group's stock is low.
pub const LOW_STOCK_UNITS: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Critical,
    Low,
    Adequate,
}

impl StockLevel {
    pub fn classify(units: u32) -> Self {
        if units < CRITICAL_STOCK_UNITS {
            StockLevel::Critical
        } else if units < LOW_STOCK_UNITS {
            StockLevel::Low
        } else {
            StockLevel::Adequate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Critical => "critical",
            StockLevel::Low => "low",
            StockLevel::Adequate => "adequate",
        }
    }
}

/// One group's row in the inventory screen.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryOverview {
    pub group: BloodGroup,
    pub units: u32,
    /// Distinct donors who have ever contributed to this group.
    pub donor_count: usize,
    pub can_donate_to: &'static [BloodGroup],
    pub can_receive_from: &'static [BloodGroup],
    pub level: StockLevel,
}

/// Snapshot every group's stock, in the conventional listing order.
pub fn inventory_overview(store: &impl Store) -> Result<Vec<InventoryOverview>> {
    let inventory = store.inventory()?;
    Ok(BloodGroup::ALL
        .into_iter()
        .map(|group| {
            let entry = inventory.entry(group);
            InventoryOverview {
                group,
                units: entry.units,
                donor_count: entry.donor_ids.len(),
                can_donate_to: group.can_give_to(),
                can_receive_from: group.can_receive_from(),
                level: StockLevel::classify(entry.units),
            }
        })
        .collect())
}

/// The most recent donation transactions, newest first.
pub fn recent_donations(store: &impl Store, limit: usize) -> Result<Vec<Donation>> {
    let mut donations = store.donations()?;
    donations.sort_by(|a, b| b.donated_at.cmp(&a.donated_at));
    donations.truncate(limit);
    Ok(donations)
}
