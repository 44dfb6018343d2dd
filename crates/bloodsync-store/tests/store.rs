//! Backend contract tests for the JSON flat-file store.

use bloodsync_model::{BloodGroup, Donor, DonorId, Inventory, NewDonor};
use bloodsync_store::{JsonFileStore, MemoryStore, Store};
use chrono::NaiveDate;

fn donor(id: &str, group: BloodGroup) -> Donor {
    Donor::register(
        DonorId::new(id).unwrap(),
        NewDonor {
            name: "Sneha Gupta".to_string(),
            email: "sneha@example.com".to_string(),
            phone: "5432109876".to_string(),
            age: 29,
            gender: "Female".to_string(),
            blood_group: group,
            weight_kg: 55.0,
            address: "654 Hillside".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            pincode: "600001".to_string(),
            medical_history: None,
            emergency_contact: None,
            preferred_contact_time: None,
        },
        NaiveDate::from_ymd_opt(2023, 8, 5)
            .unwrap()
            .and_hms_opt(16, 45, 0)
            .unwrap(),
    )
    .unwrap()
}

#[test]
fn fresh_directory_starts_with_seed_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).unwrap();
    assert!(store.donors().unwrap().is_empty());
    assert_eq!(
        store.inventory().unwrap(),
        Inventory::with_default_stock()
    );
}

#[test]
fn records_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let written = donor("DON-M3N4O5P6", BloodGroup::ONeg);

    {
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.put_donor(&written).unwrap();

        let mut inventory = store.inventory().unwrap();
        inventory.entry_mut(BloodGroup::ONeg).credit(3);
        inventory
            .entry_mut(BloodGroup::ONeg)
            .record_donor(&written.id);
        store.put_inventory(&inventory).unwrap();
    }

    let store = JsonFileStore::open(dir.path()).unwrap();
    let read = store.donor(&written.id).unwrap().expect("donor persisted");
    assert_eq!(read, written);

    let inventory = store.inventory().unwrap();
    assert_eq!(inventory.units(BloodGroup::ONeg), 43);
    assert_eq!(inventory.entry(BloodGroup::ONeg).donor_ids, vec![written.id]);
}

#[test]
fn put_is_an_upsert() {
    let mut store = MemoryStore::with_default_stock();
    let mut d = donor("DON-1", BloodGroup::APos);
    store.put_donor(&d).unwrap();

    d.available = false;
    store.put_donor(&d).unwrap();

    assert_eq!(store.donors().unwrap().len(), 1);
    assert!(!store.donor(&d.id).unwrap().unwrap().available);
}

#[test]
fn missing_donor_reads_as_none() {
    let store = MemoryStore::new();
    assert!(store
        .donor(&DonorId::new("DON-MISSING").unwrap())
        .unwrap()
        .is_none());
}
