//! Donor profiles and registration validation.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::blood_group::BloodGroup;
use crate::error::ModelError;
use crate::ids::DonorId;

/// Minimum registration age in years.
pub const MIN_DONOR_AGE: u32 = 18;
/// Maximum registration age in years.
pub const MAX_DONOR_AGE: u32 = 65;
/// Minimum body weight in kilograms.
pub const MIN_DONOR_WEIGHT_KG: f64 = 50.0;

/// Whether a donor participates in matching. Donors are never deleted;
/// retirement flips the status to inactive instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorStatus {
    Active,
    Inactive,
}

impl DonorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonorStatus::Active => "active",
            DonorStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DonorStatus::Active)
    }
}

impl fmt::Display for DonorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonorStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(DonorStatus::Active),
            "inactive" => Ok(DonorStatus::Inactive),
            _ => Err(ModelError::Message(format!("unknown donor status: {s}"))),
        }
    }
}

/// A registered donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: BloodGroup,
    pub weight_kg: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub preferred_contact_time: Option<String>,
    pub available: bool,
    pub status: DonorStatus,
    pub total_donations: u32,
    pub last_donation: Option<NaiveDate>,
    pub registered_at: NaiveDateTime,
}

/// Registration input for a new donor, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: BloodGroup,
    pub weight_kg: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub preferred_contact_time: Option<String>,
}

/// Partial profile update applied by the donor themselves.
#[derive(Debug, Clone, Default)]
pub struct DonorUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub available: Option<bool>,
}

impl Donor {
    /// Build a donor record from registration input.
    ///
    /// Validation happens here, once: age must fall in 18..=65 and weight
    /// must be at least 50 kg. New donors start available, active, with an
    /// empty donation history.
    pub fn register(
        id: DonorId,
        input: NewDonor,
        registered_at: NaiveDateTime,
    ) -> Result<Self, ModelError> {
        if input.age < MIN_DONOR_AGE || input.age > MAX_DONOR_AGE {
            return Err(ModelError::AgeOutOfRange(input.age));
        }
        if input.weight_kg < MIN_DONOR_WEIGHT_KG {
            return Err(ModelError::WeightBelowMinimum(input.weight_kg));
        }
        Ok(Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            age: input.age,
            gender: input.gender,
            blood_group: input.blood_group,
            weight_kg: input.weight_kg,
            address: input.address,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            medical_history: input.medical_history,
            emergency_contact: input.emergency_contact,
            preferred_contact_time: input.preferred_contact_time,
            available: true,
            status: DonorStatus::Active,
            total_donations: 0,
            last_donation: None,
            registered_at,
        })
    }

    /// Apply a profile update, leaving unset fields untouched.
    pub fn apply_update(&mut self, update: DonorUpdate) {
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }

    /// Record a completed donation against this profile.
    pub fn record_donation(&mut self, on: NaiveDate) {
        self.last_donation = Some(on);
        self.total_donations += 1;
    }

    /// True when the donor should be considered for matching at all.
    pub fn is_matchable(&self) -> bool {
        self.available && self.status.is_active()
    }
}
