//! The blood bank's standing stock, keyed by blood group.
//!
//! Unit counts never go negative: debits clamp at zero and report how many
//! units actually left the entry, so callers can log the discrepancy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::blood_group::BloodGroup;
use crate::ids::DonorId;

/// Stock for a single blood group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub units: u32,
    /// Every donor who has ever contributed to this group.
    #[serde(rename = "donors", default)]
    pub donor_ids: Vec<DonorId>,
}

impl InventoryEntry {
    pub fn credit(&mut self, units: u32) {
        self.units += units;
    }

    /// Remove up to `units`, clamping at zero. Returns the units actually
    /// removed so the caller can detect the clamp.
    pub fn debit(&mut self, units: u32) -> u32 {
        let removed = units.min(self.units);
        self.units -= removed;
        removed
    }

    /// Add a donor to the contributor set, once.
    pub fn record_donor(&mut self, id: &DonorId) {
        if !self.donor_ids.contains(id) {
            self.donor_ids.push(id.clone());
        }
    }
}

/// Process-wide stock, one entry per blood group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: BTreeMap<BloodGroup, InventoryEntry>,
}

impl Inventory {
    /// Empty inventory with an entry per group.
    pub fn empty() -> Self {
        let entries = BloodGroup::ALL
            .into_iter()
            .map(|group| (group, InventoryEntry::default()))
            .collect();
        Self { entries }
    }

    /// The default seed stock a fresh installation starts with.
    pub fn with_default_stock() -> Self {
        let mut inventory = Self::empty();
        for (group, units) in [
            (BloodGroup::APos, 50),
            (BloodGroup::ANeg, 30),
            (BloodGroup::BPos, 45),
            (BloodGroup::BNeg, 25),
            (BloodGroup::AbPos, 20),
            (BloodGroup::AbNeg, 15),
            (BloodGroup::OPos, 60),
            (BloodGroup::ONeg, 40),
        ] {
            inventory.entry_mut(group).units = units;
        }
        inventory
    }

    pub fn entry(&self, group: BloodGroup) -> &InventoryEntry {
        // `empty()` seeds every group and deserialization only adds entries,
        // but guard against a hand-edited data file missing a row.
        static EMPTY: InventoryEntry = InventoryEntry {
            units: 0,
            donor_ids: Vec::new(),
        };
        self.entries.get(&group).unwrap_or(&EMPTY)
    }

    pub fn entry_mut(&mut self, group: BloodGroup) -> &mut InventoryEntry {
        self.entries.entry(group).or_default()
    }

    pub fn units(&self, group: BloodGroup) -> u32 {
        self.entry(group).units
    }

    pub fn total_units(&self) -> u32 {
        self.entries.values().map(|entry| entry.units).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BloodGroup, &InventoryEntry)> {
        self.entries.iter().map(|(group, entry)| (*group, entry))
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_clamps_at_zero() {
        let mut entry = InventoryEntry {
            units: 3,
            donor_ids: Vec::new(),
        };
        assert_eq!(entry.debit(2), 2);
        assert_eq!(entry.units, 1);
        assert_eq!(entry.debit(5), 1);
        assert_eq!(entry.units, 0);
    }

    #[test]
    fn record_donor_is_idempotent() {
        let mut entry = InventoryEntry::default();
        let id = DonorId::new("DON-1").unwrap();
        entry.record_donor(&id);
        entry.record_donor(&id);
        assert_eq!(entry.donor_ids.len(), 1);
    }

    #[test]
    fn default_stock_matches_seed() {
        let inventory = Inventory::with_default_stock();
        assert_eq!(inventory.units(BloodGroup::APos), 50);
        assert_eq!(inventory.units(BloodGroup::AbNeg), 15);
        assert_eq!(inventory.units(BloodGroup::ONeg), 40);
        assert_eq!(inventory.total_units(), 285);
    }

    #[test]
    fn serializes_with_display_keys() {
        let inventory = Inventory::with_default_stock();
        let json = serde_json::to_string(&inventory).unwrap();
        assert!(json.contains("\"A+\""));
        assert!(json.contains("\"O-\""));
        let back: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inventory);
    }
}
