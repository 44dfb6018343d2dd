//! Aggregate counts for the dashboard.

use serde::Serialize;

use bloodsync_model::BloodGroup;
use bloodsync_store::{Result, Store};

use crate::overview::StockLevel;

/// A point-in-time snapshot of the whole system.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_donors: usize,
    pub available_donors: usize,
    pub total_requestors: usize,
    pub total_requests: usize,
    /// Requests still accepting donations (pending or partial).
    pub active_requests: usize,
    pub fulfilled_requests: usize,
    pub total_donations: usize,
    pub total_inventory_units: u32,
    /// Groups whose stock classifies as critical.
    pub critical_groups: Vec<BloodGroup>,
    /// Groups whose stock classifies as low (but not critical).
    pub low_groups: Vec<BloodGroup>,
}

impl Statistics {
    pub fn collect(store: &impl Store) -> Result<Self> {
        let donors = store.donors()?;
        let requests = store.requests()?;
        let inventory = store.inventory()?;

        let mut critical_groups = Vec::new();
        let mut low_groups = Vec::new();
        for (group, entry) in inventory.iter() {
            match StockLevel::classify(entry.units) {
                StockLevel::Critical => critical_groups.push(group),
                StockLevel::Low => low_groups.push(group),
                StockLevel::Adequate => {}
            }
        }

        Ok(Self {
            total_donors: donors.len(),
            available_donors: donors.iter().filter(|d| d.is_matchable()).count(),
            total_requestors: store.requestors()?.len(),
            total_requests: requests.len(),
            active_requests: requests.iter().filter(|r| r.status.is_open()).count(),
            fulfilled_requests: requests.iter().filter(|r| !r.status.is_open()).count(),
            total_donations: store.donations()?.len(),
            total_inventory_units: inventory.total_units(),
            critical_groups,
            low_groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloodsync_store::MemoryStore;

    #[test]
    fn empty_store_yields_zero_counts() {
        let store = MemoryStore::new();
        let stats = Statistics::collect(&store).unwrap();
        assert_eq!(stats.total_donors, 0);
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.total_inventory_units, 0);
        // An empty pool puts every group below the critical line.
        assert_eq!(stats.critical_groups.len(), 8);
        assert!(stats.low_groups.is_empty());
    }

    #[test]
    fn default_stock_flags_the_thin_groups() {
        let store = MemoryStore::with_default_stock();
        let stats = Statistics::collect(&store).unwrap();
        assert_eq!(stats.total_inventory_units, 285);
        // AB- seeds at 15.
        assert_eq!(stats.critical_groups, vec![BloodGroup::AbNeg]);
        // A- at 30, B- at 25, AB+ at 20.
        assert_eq!(
            stats.low_groups,
            vec![BloodGroup::ANeg, BloodGroup::BNeg, BloodGroup::AbPos]
        );
    }
}
