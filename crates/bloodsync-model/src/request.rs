//! Blood requests and their fulfillment state machine.
//!
//! A request moves `pending → partial → fulfilled`, monotonically; `partial`
//! is skipped when a single credit satisfies the full need. The invariant is
//! `status == Fulfilled ⟺ fulfilled_units >= units_needed` — crediting past
//! the need is permitted (inventory withdrawals and trusting caller-supplied
//! unit counts both allow it), so `fulfilled_units` may exceed
//! `units_needed` while `remaining_units` saturates at zero.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::blood_group::BloodGroup;
use crate::error::ModelError;
use crate::ids::{DonorId, RequestId, RequestorId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Partial,
    Fulfilled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Partial => "partial",
            RequestStatus::Fulfilled => "fulfilled",
        }
    }

    /// Pending and partial requests still accept donations.
    pub fn is_open(&self) -> bool {
        matches!(self, RequestStatus::Pending | RequestStatus::Partial)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "partial" => Ok(RequestStatus::Partial),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            _ => Err(ModelError::Message(format!("unknown request status: {s}"))),
        }
    }
}

/// Request urgency. Lower rank sorts first when donors browse open requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Normal,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Critical => "critical",
            Urgency::High => "high",
            Urgency::Normal => "normal",
        }
    }

    /// Sort rank: critical first.
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Critical => 0,
            Urgency::High => 1,
            Urgency::Normal => 2,
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Urgency::Critical),
            "high" => Ok(Urgency::High),
            "normal" => Ok(Urgency::Normal),
            _ => Err(ModelError::Message(format!("unknown urgency: {s}"))),
        }
    }
}

/// How the request entered the system. Withdrawals are synthetic requests
/// created already fulfilled when a requestor draws straight from stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Standard,
    InventoryWithdrawal,
}

impl Default for RequestKind {
    fn default() -> Self {
        RequestKind::Standard
    }
}

/// A blood request filed by a requestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: RequestId,
    pub requestor_id: Option<RequestorId>,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub blood_group: BloodGroup,
    pub units_needed: u32,
    pub fulfilled_units: u32,
    /// Units drawn from the shared pool for this request.
    #[serde(default)]
    pub inventory_used: u32,
    pub hospital_name: String,
    pub hospital_address: String,
    pub city: String,
    pub state: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    pub required_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: RequestStatus,
    #[serde(default)]
    pub kind: RequestKind,
    pub created_at: NaiveDateTime,
    /// Advisory cache of the last match run; never authoritative.
    #[serde(default)]
    pub matched_donors: Vec<DonorId>,
}

/// Input for a new blood request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRequest {
    pub requestor_id: Option<RequestorId>,
    pub patient_name: String,
    pub patient_age: u32,
    pub patient_gender: String,
    pub blood_group: BloodGroup,
    pub units_needed: u32,
    pub hospital_name: String,
    pub hospital_address: String,
    pub city: String,
    pub state: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    pub required_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
}

impl BloodRequest {
    pub fn open(id: RequestId, input: NewRequest, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            requestor_id: input.requestor_id,
            patient_name: input.patient_name,
            patient_age: input.patient_age,
            patient_gender: input.patient_gender,
            blood_group: input.blood_group,
            units_needed: input.units_needed,
            fulfilled_units: 0,
            inventory_used: 0,
            hospital_name: input.hospital_name,
            hospital_address: input.hospital_address,
            city: input.city,
            state: input.state,
            contact_name: input.contact_name,
            contact_phone: input.contact_phone,
            contact_email: input.contact_email,
            urgency: input.urgency,
            required_date: input.required_date,
            reason: input.reason,
            status: RequestStatus::Pending,
            kind: RequestKind::Standard,
            created_at,
            matched_donors: Vec::new(),
        }
    }

    /// Units still needed; saturates at zero when over-credited.
    pub fn remaining_units(&self) -> u32 {
        self.units_needed.saturating_sub(self.fulfilled_units)
    }

    /// Credit donated units and advance the status machine.
    ///
    /// Fulfilled once `fulfilled_units >= units_needed`, partial while some
    /// but not all units are in, pending only while nothing has been
    /// credited. Transitions are monotonic; this never moves a request
    /// backwards.
    pub fn apply_credit(&mut self, units: u32) {
        self.fulfilled_units += units;
        if self.fulfilled_units >= self.units_needed {
            self.status = RequestStatus::Fulfilled;
        } else if self.fulfilled_units > 0 {
            self.status = RequestStatus::Partial;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(units_needed: u32) -> BloodRequest {
        BloodRequest::open(
            RequestId::new("BR-1").unwrap(),
            NewRequest {
                requestor_id: None,
                patient_name: "Ramesh Iyer".to_string(),
                patient_age: 45,
                patient_gender: "Male".to_string(),
                blood_group: BloodGroup::APos,
                units_needed,
                hospital_name: "City General Hospital".to_string(),
                hospital_address: "Hospital Road".to_string(),
                city: "Hyderabad".to_string(),
                state: "Telangana".to_string(),
                contact_name: "Dr. Meera Reddy".to_string(),
                contact_phone: "3210987654".to_string(),
                contact_email: None,
                urgency: Urgency::High,
                required_date: NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
                reason: Some("Surgery".to_string()),
            },
            NaiveDate::from_ymd_opt(2025, 2, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn credit_moves_pending_to_partial_to_fulfilled() {
        let mut req = request(5);
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.remaining_units(), 5);

        req.apply_credit(3);
        assert_eq!(req.status, RequestStatus::Partial);
        assert_eq!(req.remaining_units(), 2);

        req.apply_credit(2);
        assert_eq!(req.status, RequestStatus::Fulfilled);
        assert_eq!(req.remaining_units(), 0);
    }

    #[test]
    fn partial_is_skipped_when_satisfied_in_one_step() {
        let mut req = request(5);
        req.apply_credit(5);
        assert_eq!(req.status, RequestStatus::Fulfilled);
    }

    #[test]
    fn zero_credit_leaves_request_pending() {
        let mut req = request(5);
        req.apply_credit(0);
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[test]
    fn over_credit_saturates_remaining() {
        let mut req = request(5);
        req.apply_credit(8);
        assert_eq!(req.status, RequestStatus::Fulfilled);
        assert_eq!(req.fulfilled_units, 8);
        assert_eq!(req.remaining_units(), 0);
    }

    #[test]
    fn urgency_ranks_critical_first() {
        assert!(Urgency::Critical.rank() < Urgency::High.rank());
        assert!(Urgency::High.rank() < Urgency::Normal.rank());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Partial,
            RequestStatus::Fulfilled,
        ] {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
        assert!(RequestStatus::Pending.is_open());
        assert!(!RequestStatus::Fulfilled.is_open());
    }
}
