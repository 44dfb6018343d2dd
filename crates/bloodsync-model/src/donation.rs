//! Donations: immutable records of completed blood transfers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::blood_group::BloodGroup;
use crate::ids::{AssignmentId, DonationId, DonorId, RequestId};

/// Where the blood came from: a person, or the standing inventory pool
/// (withdrawals). Serializes as the donor id string, with the `INVENTORY`
/// sentinel for pool draws, matching the flat-file data format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationSource {
    Donor(DonorId),
    Inventory,
}

impl DonationSource {
    pub fn donor_id(&self) -> Option<&DonorId> {
        match self {
            DonationSource::Donor(id) => Some(id),
            DonationSource::Inventory => None,
        }
    }

    fn as_record_str(&self) -> &str {
        match self {
            DonationSource::Donor(id) => id.as_str(),
            DonationSource::Inventory => DonorId::INVENTORY,
        }
    }
}

impl Serialize for DonationSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_record_str())
    }
}

impl<'de> Deserialize<'de> for DonationSource {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == DonorId::INVENTORY {
            return Ok(DonationSource::Inventory);
        }
        DonorId::new(s)
            .map(DonationSource::Donor)
            .map_err(serde::de::Error::custom)
    }
}

/// A completed blood transfer: donor→inventory, donor→request, or
/// inventory→request. Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: DonationId,
    pub source: DonationSource,
    /// Display name captured at donation time.
    pub donor_name: String,
    pub blood_group: BloodGroup,
    pub units: u32,
    /// Absent for direct-to-inventory donations.
    #[serde(default)]
    pub request_id: Option<RequestId>,
    #[serde(default)]
    pub assignment_id: Option<AssignmentId>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub hospital_name: Option<String>,
    pub donated_at: NaiveDateTime,
    #[serde(default)]
    pub donation_center: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn source_serializes_as_donor_id_or_sentinel() {
        let donor = DonationSource::Donor(DonorId::new("DON-1234ABCD").unwrap());
        assert_eq!(
            serde_json::to_string(&donor).unwrap(),
            "\"DON-1234ABCD\""
        );
        assert_eq!(
            serde_json::to_string(&DonationSource::Inventory).unwrap(),
            "\"INVENTORY\""
        );

        let back: DonationSource = serde_json::from_str("\"INVENTORY\"").unwrap();
        assert_eq!(back, DonationSource::Inventory);
        let back: DonationSource = serde_json::from_str("\"DON-1234ABCD\"").unwrap();
        assert_eq!(back.donor_id().unwrap().as_str(), "DON-1234ABCD");
    }

    #[test]
    fn donation_record_round_trips() {
        let donation = Donation {
            id: DonationId::new("DN-1").unwrap(),
            source: DonationSource::Donor(DonorId::new("DON-1").unwrap()),
            donor_name: "Rahul Sharma".to_string(),
            blood_group: BloodGroup::OPos,
            units: 2,
            request_id: Some(RequestId::new("BR-1").unwrap()),
            assignment_id: None,
            patient_name: Some("Ramesh Iyer".to_string()),
            hospital_name: None,
            donated_at: NaiveDate::from_ymd_opt(2025, 2, 3)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            donation_center: Some("Main Center".to_string()),
            notes: None,
        };
        let json = serde_json::to_string(&donation).unwrap();
        let back: Donation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, donation);
    }
}
