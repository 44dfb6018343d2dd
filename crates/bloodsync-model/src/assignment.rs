//! Assignments: a proposed donor-to-request pairing.
//!
//! Two confirmation flows touch an assignment and they are independent: the
//! donor marks the donation completed, and the requestor acknowledges the
//! offer. Each gets its own flag so neither write can clobber the other.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, DonorId, RequestId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub donor_id: DonorId,
    pub request_id: RequestId,
    pub units_offered: u32,
    /// Donor-side flow: accepted → completed.
    pub donor_completed: bool,
    /// Requestor-side acknowledgment; informational, moves no units.
    pub requestor_confirmed: bool,
    pub accepted_at: NaiveDateTime,
    pub donated_at: Option<NaiveDateTime>,
    pub confirmed_at: Option<NaiveDateTime>,
    /// Units actually donated; set when the donor completes. May differ from
    /// `units_offered` — the ledger trusts the caller's figure.
    pub units_donated: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Assignment {
    pub fn accepted(
        id: AssignmentId,
        donor_id: DonorId,
        request_id: RequestId,
        units_offered: u32,
        accepted_at: NaiveDateTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            donor_id,
            request_id,
            units_offered,
            donor_completed: false,
            requestor_confirmed: false,
            accepted_at,
            donated_at: None,
            confirmed_at: None,
            units_donated: None,
            notes,
        }
    }

    /// Donor-side completion. Idempotence is the caller's concern; the
    /// ledger rejects a second completion before getting here.
    pub fn complete(&mut self, units_donated: u32, donated_at: NaiveDateTime) {
        self.donor_completed = true;
        self.units_donated = Some(units_donated);
        self.donated_at = Some(donated_at);
    }

    /// Requestor-side acknowledgment. Leaves the donor-side flow untouched.
    pub fn confirm_by_requestor(&mut self, confirmed_at: NaiveDateTime) {
        self.requestor_confirmed = true;
        self.confirmed_at = Some(confirmed_at);
    }

    /// Still awaiting the donor's donation.
    pub fn is_open(&self) -> bool {
        !self.donor_completed
    }
}
