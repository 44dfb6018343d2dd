//! In-memory backend for tests and ephemeral runs.

use std::collections::BTreeMap;

use bloodsync_model::{
    Assignment, AssignmentId, BloodRequest, Donation, DonationId, Donor, DonorId, Inventory,
    RequestId, Requestor, RequestorId,
};

use crate::error::Result;
use crate::Store;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    donors: BTreeMap<DonorId, Donor>,
    requestors: BTreeMap<RequestorId, Requestor>,
    requests: BTreeMap<RequestId, BloodRequest>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    donations: BTreeMap<DonationId, Donation>,
    inventory: Inventory,
}

impl MemoryStore {
    /// Empty store with an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store carrying the default seed stock.
    pub fn with_default_stock() -> Self {
        Self {
            inventory: Inventory::with_default_stock(),
            ..Self::default()
        }
    }
}

impl Store for MemoryStore {
    fn donor(&self, id: &DonorId) -> Result<Option<Donor>> {
        Ok(self.donors.get(id).cloned())
    }

    fn donors(&self) -> Result<Vec<Donor>> {
        Ok(self.donors.values().cloned().collect())
    }

    fn put_donor(&mut self, donor: &Donor) -> Result<()> {
        self.donors.insert(donor.id.clone(), donor.clone());
        Ok(())
    }

    fn requestor(&self, id: &RequestorId) -> Result<Option<Requestor>> {
        Ok(self.requestors.get(id).cloned())
    }

    fn requestors(&self) -> Result<Vec<Requestor>> {
        Ok(self.requestors.values().cloned().collect())
    }

    fn put_requestor(&mut self, requestor: &Requestor) -> Result<()> {
        self.requestors
            .insert(requestor.id.clone(), requestor.clone());
        Ok(())
    }

    fn request(&self, id: &RequestId) -> Result<Option<BloodRequest>> {
        Ok(self.requests.get(id).cloned())
    }

    fn requests(&self) -> Result<Vec<BloodRequest>> {
        Ok(self.requests.values().cloned().collect())
    }

    fn put_request(&mut self, request: &BloodRequest) -> Result<()> {
        self.requests.insert(request.id.clone(), request.clone());
        Ok(())
    }

    fn assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>> {
        Ok(self.assignments.get(id).cloned())
    }

    fn assignments(&self) -> Result<Vec<Assignment>> {
        Ok(self.assignments.values().cloned().collect())
    }

    fn put_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        self.assignments
            .insert(assignment.id.clone(), assignment.clone());
        Ok(())
    }

    fn donation(&self, id: &DonationId) -> Result<Option<Donation>> {
        Ok(self.donations.get(id).cloned())
    }

    fn donations(&self) -> Result<Vec<Donation>> {
        Ok(self.donations.values().cloned().collect())
    }

    fn put_donation(&mut self, donation: &Donation) -> Result<()> {
        self.donations.insert(donation.id.clone(), donation.clone());
        Ok(())
    }

    fn inventory(&self) -> Result<Inventory> {
        Ok(self.inventory.clone())
    }

    fn put_inventory(&mut self, inventory: &Inventory) -> Result<()> {
        self.inventory = inventory.clone();
        Ok(())
    }
}
