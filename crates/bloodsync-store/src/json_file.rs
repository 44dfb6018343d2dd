//! Flat-file JSON backend.
//!
//! One file per collection in a data directory, mirroring the original
//! system's layout: `donors.json`, `requestors.json`, `blood_requests.json`,
//! `donations.json`, `assignments.json`, `inventory.json`. Collections are
//! stored as id-keyed JSON objects. Everything is loaded on open; each put
//! rewrites the affected file. A missing file means an empty collection,
//! except inventory which falls back to the default seed stock.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use bloodsync_model::{
    Assignment, AssignmentId, BloodRequest, Donation, DonationId, Donor, DonorId, Inventory,
    RequestId, Requestor, RequestorId,
};

use crate::error::{Result, StoreError};
use crate::Store;

const DONORS_FILE: &str = "donors.json";
const REQUESTORS_FILE: &str = "requestors.json";
const REQUESTS_FILE: &str = "blood_requests.json";
const DONATIONS_FILE: &str = "donations.json";
const ASSIGNMENTS_FILE: &str = "assignments.json";
const INVENTORY_FILE: &str = "inventory.json";

#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    donors: BTreeMap<DonorId, Donor>,
    requestors: BTreeMap<RequestorId, Requestor>,
    requests: BTreeMap<RequestId, BloodRequest>,
    assignments: BTreeMap<AssignmentId, Assignment>,
    donations: BTreeMap<DonationId, Donation>,
    inventory: Inventory,
}

impl JsonFileStore {
    /// Open (and create if needed) a data directory and load every
    /// collection from it.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
            path: data_dir.clone(),
            source,
        })?;

        let store = Self {
            donors: load_collection(&data_dir.join(DONORS_FILE))?,
            requestors: load_collection(&data_dir.join(REQUESTORS_FILE))?,
            requests: load_collection(&data_dir.join(REQUESTS_FILE))?,
            assignments: load_collection(&data_dir.join(ASSIGNMENTS_FILE))?,
            donations: load_collection(&data_dir.join(DONATIONS_FILE))?,
            inventory: load_inventory(&data_dir.join(INVENTORY_FILE))?,
            data_dir,
        };
        debug!(
            dir = %store.data_dir.display(),
            donors = store.donors.len(),
            requests = store.requests.len(),
            "opened json store"
        );
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.data_dir.join(file);
        let json =
            serde_json::to_string_pretty(value).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }
}

fn load_collection<K, V>(path: &Path) -> Result<BTreeMap<K, V>>
where
    K: Ord + DeserializeOwned,
    V: DeserializeOwned,
{
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn load_inventory(path: &Path) -> Result<Inventory> {
    if !path.exists() {
        return Ok(Inventory::with_default_stock());
    }
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

impl Store for JsonFileStore {
    fn donor(&self, id: &DonorId) -> Result<Option<Donor>> {
        Ok(self.donors.get(id).cloned())
    }

    fn donors(&self) -> Result<Vec<Donor>> {
        Ok(self.donors.values().cloned().collect())
    }

    fn put_donor(&mut self, donor: &Donor) -> Result<()> {
        self.donors.insert(donor.id.clone(), donor.clone());
        self.save(DONORS_FILE, &self.donors)
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
        self.save(REQUESTORS_FILE, &self.requestors)
    }

    fn request(&self, id: &RequestId) -> Result<Option<BloodRequest>> {
        Ok(self.requests.get(id).cloned())
    }

    fn requests(&self) -> Result<Vec<BloodRequest>> {
        Ok(self.requests.values().cloned().collect())
    }

    fn put_request(&mut self, request: &BloodRequest) -> Result<()> {
        self.requests.insert(request.id.clone(), request.clone());
        self.save(REQUESTS_FILE, &self.requests)
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
        self.save(ASSIGNMENTS_FILE, &self.assignments)
    }

    fn donation(&self, id: &DonationId) -> Result<Option<Donation>> {
        Ok(self.donations.get(id).cloned())
    }

    fn donations(&self) -> Result<Vec<Donation>> {
        Ok(self.donations.values().cloned().collect())
    }

    fn put_donation(&mut self, donation: &Donation) -> Result<()> {
        self.donations.insert(donation.id.clone(), donation.clone());
        self.save(DONATIONS_FILE, &self.donations)
    }

    fn inventory(&self) -> Result<Inventory> {
        Ok(self.inventory.clone())
    }

    fn put_inventory(&mut self, inventory: &Inventory) -> Result<()> {
        self.inventory = inventory.clone();
        self.save(INVENTORY_FILE, &self.inventory)
    }
}
