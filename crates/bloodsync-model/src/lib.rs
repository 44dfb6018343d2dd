pub mod assignment;
pub mod blood_group;
pub mod donation;
pub mod donor;
pub mod error;
pub mod ids;
pub mod inventory;
pub mod request;
pub mod requestor;

pub use assignment::Assignment;
pub use blood_group::BloodGroup;
pub use donation::{Donation, DonationSource};
pub use donor::{
    Donor, DonorStatus, DonorUpdate, MAX_DONOR_AGE, MIN_DONOR_AGE, MIN_DONOR_WEIGHT_KG, NewDonor,
};
pub use error::{ModelError, Result};
pub use ids::{AssignmentId, DonationId, DonorId, RequestId, RequestorId};
pub use inventory::{Inventory, InventoryEntry};
pub use request::{BloodRequest, NewRequest, RequestKind, RequestStatus, Urgency};
pub use requestor::{NewRequestor, Requestor};
