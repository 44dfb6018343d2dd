//! Persistent storage for BloodSync entities.
//!
//! The core operates against the [`Store`] trait and must not depend on the
//! backend. Two interchangeable backends ship:
//!
//! - [`MemoryStore`] — `BTreeMap`-backed, for tests and ephemeral runs.
//! - [`JsonFileStore`] — one JSON file per collection in a data directory,
//!   loaded on open and written through after every mutation.
//!
//! Reads return owned records; writers upsert by id. There are no
//! transactional guarantees across collections — a multi-step ledger
//! operation that fails midway can leave collections inconsistent, which is
//! a documented limitation of the system.

mod error;
mod json_file;
mod memory;

pub use error::{Result, StoreError};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use bloodsync_model::{
    Assignment, AssignmentId, BloodRequest, Donation, DonationId, Donor, DonorId, Inventory,
    RequestId, Requestor, RequestorId,
};

/// Storage contract for all entity collections plus the inventory.
pub trait Store {
    fn donor(&self, id: &DonorId) -> Result<Option<Donor>>;
    fn donors(&self) -> Result<Vec<Donor>>;
    fn put_donor(&mut self, donor: &Donor) -> Result<()>;

    fn requestor(&self, id: &RequestorId) -> Result<Option<Requestor>>;
    fn requestors(&self) -> Result<Vec<Requestor>>;
    fn put_requestor(&mut self, requestor: &Requestor) -> Result<()>;

    fn request(&self, id: &RequestId) -> Result<Option<BloodRequest>>;
    fn requests(&self) -> Result<Vec<BloodRequest>>;
    fn put_request(&mut self, request: &BloodRequest) -> Result<()>;

    fn assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>>;
    fn assignments(&self) -> Result<Vec<Assignment>>;
    fn put_assignment(&mut self, assignment: &Assignment) -> Result<()>;

    fn donation(&self, id: &DonationId) -> Result<Option<Donation>>;
    fn donations(&self) -> Result<Vec<Donation>>;
    fn put_donation(&mut self, donation: &Donation) -> Result<()>;

    fn inventory(&self) -> Result<Inventory>;
    fn put_inventory(&mut self, inventory: &Inventory) -> Result<()>;
}
