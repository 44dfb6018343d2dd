//! The fulfillment ledger.
//!
//! All entity mutation in the system funnels through [`Ledger`], which owns
//! the store. Every mutating operation takes `&mut self`, so one exclusive
//! borrow is the mutual-exclusion scope guarding each read-modify-write
//! sequence — concurrent callers wrap the ledger in a `Mutex` and cannot
//! double-spend inventory.
//!
//! Multi-step operations are not atomic across store writes: a storage
//! failure mid-sequence can leave collections inconsistent (e.g. a donation
//! recorded without the matching inventory debit). Known limitation.

use tracing::{info, warn};

use bloodsync_match::{
    EligibleDonor, MatchResult, OpenRequest, can_donate_now, eligible_donors_for_remaining,
    match_request, open_requests_for_donor,
};
use bloodsync_model::{
    Assignment, AssignmentId, BloodGroup, BloodRequest, Donation, DonationSource, Donor, DonorId,
    DonorUpdate, NewDonor, NewRequest, NewRequestor, RequestId, RequestKind, RequestStatus,
    Requestor, RequestorId, Urgency,
};
use bloodsync_store::Store;

use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::idgen::{IdGenerator, UuidIdGenerator};

/// Upper bound on units for a single direct-to-inventory donation.
pub const MAX_INVENTORY_DONATION_UNITS: u32 = 50;

/// Everything `confirm_donation` produced, for callers that present the
/// outcome.
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    pub assignment: Assignment,
    pub request: BloodRequest,
    pub donation: Donation,
}

pub struct Ledger<S, C = SystemClock, G = UuidIdGenerator> {
    store: S,
    clock: C,
    ids: G,
}

impl<S: Store> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
            ids: UuidIdGenerator,
        }
    }
}

impl<S: Store, C: Clock, G: IdGenerator> Ledger<S, C, G> {
    /// Build a ledger with explicit clock and id generator (tests pin both).
    pub fn with_parts(store: S, clock: C, ids: G) -> Self {
        Self { store, clock, ids }
    }

    /// Read-only access to the underlying store, for reporting.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ---- lookups -------------------------------------------------------

    fn donor(&self, id: &DonorId) -> Result<Donor> {
        self.store.donor(id)?.ok_or_else(|| LedgerError::NotFound {
            kind: "donor",
            id: id.to_string(),
        })
    }

    fn requestor(&self, id: &RequestorId) -> Result<Requestor> {
        self.store
            .requestor(id)?
            .ok_or_else(|| LedgerError::NotFound {
                kind: "requestor",
                id: id.to_string(),
            })
    }

    fn request(&self, id: &RequestId) -> Result<BloodRequest> {
        self.store
            .request(id)?
            .ok_or_else(|| LedgerError::NotFound {
                kind: "request",
                id: id.to_string(),
            })
    }

    fn assignment(&self, id: &AssignmentId) -> Result<Assignment> {
        self.store
            .assignment(id)?
            .ok_or_else(|| LedgerError::NotFound {
                kind: "assignment",
                id: id.to_string(),
            })
    }

    // ---- registration --------------------------------------------------

    /// Register a new donor and record them in their group's inventory
    /// contributor list.
    pub fn register_donor(&mut self, input: NewDonor) -> Result<Donor> {
        let id = self.ids.donor_id();
        let donor = Donor::register(id, input, self.clock.now())?;
        self.store.put_donor(&donor)?;

        let mut inventory = self.store.inventory()?;
        inventory
            .entry_mut(donor.blood_group)
            .record_donor(&donor.id);
        self.store.put_inventory(&inventory)?;

        info!(donor = %donor.id, group = %donor.blood_group, "registered donor");
        Ok(donor)
    }

    /// Apply a donor's profile update (contact, location, availability).
    pub fn update_donor_profile(&mut self, id: &DonorId, update: DonorUpdate) -> Result<Donor> {
        let mut donor = self.donor(id)?;
        donor.apply_update(update);
        self.store.put_donor(&donor)?;
        Ok(donor)
    }

    pub fn register_requestor(&mut self, input: NewRequestor) -> Result<Requestor> {
        let id = self.ids.requestor_id();
        let requestor = Requestor::register(id, input, self.clock.now());
        self.store.put_requestor(&requestor)?;
        info!(requestor = %requestor.id, "registered requestor");
        Ok(requestor)
    }

    // ---- requests ------------------------------------------------------

    /// File a new blood request. Runs the matcher immediately and caches the
    /// top candidates' ids on the request (advisory only).
    pub fn create_request(&mut self, input: NewRequest) -> Result<(BloodRequest, MatchResult)> {
        if input.units_needed == 0 {
            return Err(LedgerError::ZeroUnits);
        }

        let id = self.ids.request_id();
        let mut request = BloodRequest::open(id, input, self.clock.now());

        if let Some(requestor_id) = request.requestor_id.clone() {
            if let Some(mut requestor) = self.store.requestor(&requestor_id)? {
                requestor.total_requests += 1;
                self.store.put_requestor(&requestor)?;
            }
        }

        let donors = self.store.donors()?;
        let inventory = self.store.inventory()?;
        let result = match_request(&request, &donors, &inventory, self.clock.today());
        request.matched_donors = result
            .candidates
            .iter()
            .map(|m| m.donor.id.clone())
            .collect();
        self.store.put_request(&request)?;

        info!(
            request = %request.id,
            group = %request.blood_group,
            units = request.units_needed,
            matched = request.matched_donors.len(),
            "created blood request"
        );
        Ok((request, result))
    }

    // ---- donor-side flow -----------------------------------------------

    /// Donor accepts a request, creating an assignment. Moves no units.
    pub fn accept_request(
        &mut self,
        donor_id: &DonorId,
        request_id: &RequestId,
        units_offered: u32,
        notes: Option<String>,
    ) -> Result<Assignment> {
        if units_offered == 0 {
            return Err(LedgerError::ZeroUnits);
        }
        let donor = self.donor(donor_id)?;
        let request = self.request(request_id)?;

        let assignment = Assignment::accepted(
            self.ids.assignment_id(),
            donor.id,
            request.id,
            units_offered,
            self.clock.now(),
            notes,
        );
        self.store.put_assignment(&assignment)?;
        info!(
            assignment = %assignment.id,
            donor = %assignment.donor_id,
            request = %assignment.request_id,
            units_offered,
            "donor accepted request"
        );
        Ok(assignment)
    }

    /// Donor confirms the donation for an assignment.
    ///
    /// This is the one donor-initiated path that moves units: the donated
    /// blood is modeled as passing through the inventory pool even when
    /// earmarked for the request, so the request is credited *and* the
    /// donor's group stock is debited in the same operation.
    ///
    /// `units_donated` defaults to the assignment's `units_offered`; the
    /// ledger trusts the caller's figure and only logs a mismatch. Side
    /// effects span several store writes and are not atomic.
    pub fn confirm_donation(
        &mut self,
        assignment_id: &AssignmentId,
        units_donated: Option<u32>,
        donation_center: Option<String>,
    ) -> Result<ConfirmOutcome> {
        let mut assignment = self.assignment(assignment_id)?;
        if assignment.donor_completed {
            return Err(LedgerError::AlreadyCompleted(assignment.id.to_string()));
        }
        let mut donor = self.donor(&assignment.donor_id)?;
        let mut request = self.request(&assignment.request_id)?;

        let units = units_donated.unwrap_or(assignment.units_offered);
        if units != assignment.units_offered {
            warn!(
                assignment = %assignment.id,
                offered = assignment.units_offered,
                donated = units,
                "donated units differ from offered units"
            );
        }

        let now = self.clock.now();
        assignment.complete(units, now);
        self.store.put_assignment(&assignment)?;

        request.apply_credit(units);
        let mut inventory = self.store.inventory()?;
        let removed = inventory.entry_mut(donor.blood_group).debit(units);
        if removed < units {
            warn!(
                group = %donor.blood_group,
                requested = units,
                removed,
                "inventory debit clamped at zero"
            );
        }
        request.inventory_used += units;
        self.store.put_inventory(&inventory)?;
        self.store.put_request(&request)?;

        donor.record_donation(now.date());
        self.store.put_donor(&donor)?;

        let donation = Donation {
            id: self.ids.donation_id(),
            source: DonationSource::Donor(donor.id.clone()),
            donor_name: donor.name.clone(),
            blood_group: donor.blood_group,
            units,
            request_id: Some(request.id.clone()),
            assignment_id: Some(assignment.id.clone()),
            patient_name: Some(request.patient_name.clone()),
            hospital_name: Some(request.hospital_name.clone()),
            donated_at: now,
            donation_center: donation_center.or_else(|| Some(request.hospital_name.clone())),
            notes: Some(format!("Donation for request {}", request.id)),
        };
        self.store.put_donation(&donation)?;

        info!(
            assignment = %assignment.id,
            request = %request.id,
            units,
            status = %request.status,
            remaining = request.remaining_units(),
            "donation confirmed"
        );
        Ok(ConfirmOutcome {
            assignment,
            request,
            donation,
        })
    }

    /// Requestor acknowledges a donor's offer. Informational: moves no units
    /// and leaves the donor-side completion flag alone.
    pub fn requestor_confirm_donor(&mut self, assignment_id: &AssignmentId) -> Result<Assignment> {
        let mut assignment = self.assignment(assignment_id)?;
        assignment.confirm_by_requestor(self.clock.now());
        self.store.put_assignment(&assignment)?;
        info!(assignment = %assignment.id, "requestor confirmed donor");
        Ok(assignment)
    }

    // ---- inventory flows -----------------------------------------------

    /// Donor gives blood straight to the shared pool.
    pub fn donate_to_inventory(
        &mut self,
        donor_id: &DonorId,
        units: u32,
        donation_center: Option<String>,
        notes: Option<String>,
    ) -> Result<Donation> {
        if units == 0 || units > MAX_INVENTORY_DONATION_UNITS {
            return Err(LedgerError::UnitsOutOfRange {
                units,
                max: MAX_INVENTORY_DONATION_UNITS,
            });
        }
        self.record_donor_donation(donor_id, units, donation_center, notes)
    }

    /// Legacy direct donation recording; no per-visit unit cap beyond being
    /// non-zero.
    pub fn record_donation(
        &mut self,
        donor_id: &DonorId,
        units: u32,
        donation_center: Option<String>,
        notes: Option<String>,
    ) -> Result<Donation> {
        if units == 0 {
            return Err(LedgerError::ZeroUnits);
        }
        self.record_donor_donation(donor_id, units, donation_center, notes)
    }

    fn record_donor_donation(
        &mut self,
        donor_id: &DonorId,
        units: u32,
        donation_center: Option<String>,
        notes: Option<String>,
    ) -> Result<Donation> {
        let mut donor = self.donor(donor_id)?;
        if !can_donate_now(donor.last_donation, self.clock.today()) {
            return Err(LedgerError::CooldownActive);
        }

        let now = self.clock.now();
        let donation = Donation {
            id: self.ids.donation_id(),
            source: DonationSource::Donor(donor.id.clone()),
            donor_name: donor.name.clone(),
            blood_group: donor.blood_group,
            units,
            request_id: None,
            assignment_id: None,
            patient_name: None,
            hospital_name: None,
            donated_at: now,
            donation_center,
            notes,
        };
        self.store.put_donation(&donation)?;

        let mut inventory = self.store.inventory()?;
        let entry = inventory.entry_mut(donor.blood_group);
        entry.credit(units);
        entry.record_donor(&donor.id);
        self.store.put_inventory(&inventory)?;

        donor.record_donation(now.date());
        self.store.put_donor(&donor)?;

        info!(
            donor = %donor.id,
            group = %donor.blood_group,
            units,
            "donation credited to inventory"
        );
        Ok(donation)
    }

    /// Requestor draws blood straight from stock. Creates a synthetic,
    /// already-fulfilled withdrawal request plus a pool-sourced donation
    /// record, so the draw shows up in both histories.
    pub fn withdraw_from_inventory(
        &mut self,
        requestor_id: &RequestorId,
        group: BloodGroup,
        units: u32,
        reason: Option<String>,
    ) -> Result<(BloodRequest, Donation)> {
        if units == 0 {
            return Err(LedgerError::ZeroUnits);
        }
        let mut requestor = self.requestor(requestor_id)?;

        let mut inventory = self.store.inventory()?;
        let available = inventory.units(group);
        if units > available {
            return Err(LedgerError::InsufficientInventory {
                group,
                available,
                requested: units,
            });
        }

        let now = self.clock.now();
        let request = BloodRequest {
            id: self.ids.request_id(),
            requestor_id: Some(requestor.id.clone()),
            patient_name: format!("Inventory Request - {}", requestor.organization),
            patient_age: 0,
            patient_gender: "N/A".to_string(),
            blood_group: group,
            units_needed: units,
            fulfilled_units: units,
            inventory_used: units,
            hospital_name: requestor.organization.clone(),
            hospital_address: requestor.address.clone(),
            city: requestor.city.clone(),
            state: requestor.state.clone(),
            contact_name: requestor.name.clone(),
            contact_phone: requestor.phone.clone(),
            contact_email: Some(requestor.email.clone()),
            urgency: Urgency::Normal,
            required_date: now.date(),
            reason: reason.clone(),
            status: RequestStatus::Fulfilled,
            kind: RequestKind::InventoryWithdrawal,
            created_at: now,
            matched_donors: Vec::new(),
        };
        self.store.put_request(&request)?;

        inventory.entry_mut(group).debit(units);
        self.store.put_inventory(&inventory)?;

        requestor.total_requests += 1;
        self.store.put_requestor(&requestor)?;

        let donation = Donation {
            id: self.ids.donation_id(),
            source: DonationSource::Inventory,
            donor_name: "Blood Bank Inventory".to_string(),
            blood_group: group,
            units,
            request_id: Some(request.id.clone()),
            assignment_id: None,
            patient_name: Some(request.patient_name.clone()),
            hospital_name: Some(request.hospital_name.clone()),
            donated_at: now,
            donation_center: None,
            notes: Some(match reason {
                Some(reason) => format!("Direct withdrawal from inventory. Reason: {reason}"),
                None => "Direct withdrawal from inventory".to_string(),
            }),
        };
        self.store.put_donation(&donation)?;

        info!(
            request = %request.id,
            requestor = %requestor.id,
            group = %group,
            units,
            "withdrew units from inventory"
        );
        Ok((request, donation))
    }

    /// Cover part of an open request from stock.
    pub fn use_inventory_for_request(
        &mut self,
        request_id: &RequestId,
        units: u32,
    ) -> Result<BloodRequest> {
        let mut request = self.request(request_id)?;

        let mut inventory = self.store.inventory()?;
        let available = inventory.units(request.blood_group);
        if units > available {
            return Err(LedgerError::InsufficientInventory {
                group: request.blood_group,
                available,
                requested: units,
            });
        }

        inventory.entry_mut(request.blood_group).debit(units);
        self.store.put_inventory(&inventory)?;

        request.apply_credit(units);
        request.inventory_used += units;
        self.store.put_request(&request)?;

        info!(
            request = %request.id,
            units,
            status = %request.status,
            remaining = request.remaining_units(),
            "applied inventory units to request"
        );
        Ok(request)
    }

    // ---- read-side queries ---------------------------------------------

    /// Re-run the matcher for a stored request against live snapshots.
    pub fn match_for_request(&self, request_id: &RequestId) -> Result<MatchResult> {
        let request = self.request(request_id)?;
        let donors = self.store.donors()?;
        let inventory = self.store.inventory()?;
        Ok(match_request(
            &request,
            &donors,
            &inventory,
            self.clock.today(),
        ))
    }

    /// Open requests the donor could serve, most urgent and oldest first.
    pub fn open_requests_for_donor(&self, donor_id: &DonorId) -> Result<Vec<OpenRequest>> {
        let donor = self.donor(donor_id)?;
        let requests = self.store.requests()?;
        let assignments = self.store.assignments()?;
        Ok(open_requests_for_donor(&donor, &requests, &assignments))
    }

    /// Exact-group donors who could cover a request's remaining units.
    pub fn eligible_donors_for_remaining(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<EligibleDonor>> {
        let request = self.request(request_id)?;
        let donors = self.store.donors()?;
        let assignments = self.store.assignments()?;
        Ok(eligible_donors_for_remaining(
            &request,
            &donors,
            &assignments,
            self.clock.today(),
        ))
    }

    /// Whether the donor may donate today under the 56-day rule.
    pub fn donor_can_donate_now(&self, donor_id: &DonorId) -> Result<bool> {
        let donor = self.donor(donor_id)?;
        Ok(can_donate_now(donor.last_donation, self.clock.today()))
    }

    /// A donor's still-open assignments joined with their requests.
    pub fn assignments_for_donor(
        &self,
        donor_id: &DonorId,
    ) -> Result<Vec<(Assignment, BloodRequest)>> {
        let mut joined = Vec::new();
        for assignment in self.store.assignments()? {
            if &assignment.donor_id == donor_id && assignment.is_open() {
                if let Some(request) = self.store.request(&assignment.request_id)? {
                    joined.push((assignment, request));
                }
            }
        }
        Ok(joined)
    }

    /// All assignments on a request joined with their donors.
    pub fn assignments_for_request(
        &self,
        request_id: &RequestId,
    ) -> Result<Vec<(Assignment, Donor)>> {
        let mut joined = Vec::new();
        for assignment in self.store.assignments()? {
            if &assignment.request_id == request_id {
                if let Some(donor) = self.store.donor(&assignment.donor_id)? {
                    joined.push((assignment, donor));
                }
            }
        }
        Ok(joined)
    }

    /// A donor's donation history, newest first.
    pub fn donation_history_for_donor(&self, donor_id: &DonorId) -> Result<Vec<Donation>> {
        let mut history: Vec<Donation> = self
            .store
            .donations()?
            .into_iter()
            .filter(|d| d.source.donor_id() == Some(donor_id))
            .collect();
        history.sort_by(|a, b| b.donated_at.cmp(&a.donated_at));
        Ok(history)
    }

    /// Donations that fulfilled a request, newest first.
    pub fn fulfilled_history_for_request(&self, request_id: &RequestId) -> Result<Vec<Donation>> {
        let mut history: Vec<Donation> = self
            .store
            .donations()?
            .into_iter()
            .filter(|d| d.request_id.as_ref() == Some(request_id))
            .collect();
        history.sort_by(|a, b| b.donated_at.cmp(&a.donated_at));
        Ok(history)
    }

    /// A requestor's requests, newest first.
    pub fn request_history_for_requestor(
        &self,
        requestor_id: &RequestorId,
    ) -> Result<Vec<BloodRequest>> {
        let mut history: Vec<BloodRequest> = self
            .store
            .requests()?
            .into_iter()
            .filter(|r| r.requestor_id.as_ref() == Some(requestor_id))
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }
}
