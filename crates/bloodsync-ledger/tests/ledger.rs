//! End-to-end ledger flows over the in-memory store with pinned time.

use bloodsync_ledger::{
    FixedClock, Ledger, LedgerError, SequentialIdGenerator, MAX_INVENTORY_DONATION_UNITS,
};
use bloodsync_model::{
    BloodGroup, DonationSource, NewDonor, NewRequest, NewRequestor, RequestKind, RequestStatus,
    Urgency,
};
use bloodsync_store::{MemoryStore, Store};
use chrono::{NaiveDate, NaiveDateTime};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn ledger() -> Ledger<MemoryStore, FixedClock, SequentialIdGenerator> {
    Ledger::with_parts(
        MemoryStore::with_default_stock(),
        FixedClock(now()),
        SequentialIdGenerator::default(),
    )
}

fn new_donor(group: BloodGroup, city: &str) -> NewDonor {
    NewDonor {
        name: "Rahul Sharma".to_string(),
        email: "rahul@example.com".to_string(),
        phone: "9876543210".to_string(),
        age: 28,
        gender: "Male".to_string(),
        blood_group: group,
        weight_kg: 70.0,
        address: "123 Main Street".to_string(),
        city: city.to_string(),
        state: "Maharashtra".to_string(),
        pincode: "400001".to_string(),
        medical_history: None,
        emergency_contact: None,
        preferred_contact_time: None,
    }
}

fn new_requestor() -> NewRequestor {
    NewRequestor {
        name: "Dr. Meera Reddy".to_string(),
        email: "meera@hospital.com".to_string(),
        phone: "3210987654".to_string(),
        organization: "City General Hospital".to_string(),
        address: "Hospital Road".to_string(),
        city: "Hyderabad".to_string(),
        state: "Telangana".to_string(),
        pincode: "500001".to_string(),
    }
}

fn new_request(group: BloodGroup, units: u32) -> NewRequest {
    NewRequest {
        requestor_id: None,
        patient_name: "Ramesh Iyer".to_string(),
        patient_age: 45,
        patient_gender: "Male".to_string(),
        blood_group: group,
        units_needed: units,
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
    }
}

#[test]
fn registration_records_donor_in_inventory_contributors() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::OPos, "Mumbai")).unwrap();
    let inventory = ledger.store().inventory().unwrap();
    assert!(inventory
        .entry(BloodGroup::OPos)
        .donor_ids
        .contains(&donor.id));
    // Registration contributes no units.
    assert_eq!(inventory.units(BloodGroup::OPos), 60);
}

#[test]
fn create_request_caches_matched_donor_ids_and_bumps_requestor() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Hyderabad")).unwrap();
    let requestor = ledger.register_requestor(new_requestor()).unwrap();

    let mut input = new_request(BloodGroup::APos, 5);
    input.requestor_id = Some(requestor.id.clone());
    let (request, result) = ledger.create_request(input).unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert!(request.matched_donors.contains(&donor.id));
    assert_eq!(result.total_compatible, 1);
    assert!(result.fulfillable);
    assert_eq!(
        ledger.store().requestor(&requestor.id).unwrap().unwrap().total_requests,
        1
    );
}

#[test]
fn confirm_donation_drives_partial_then_fulfilled() {
    let mut ledger = ledger();
    let donor_a = ledger.register_donor(new_donor(BloodGroup::APos, "Hyderabad")).unwrap();
    let donor_b = ledger.register_donor(new_donor(BloodGroup::ONeg, "Chennai")).unwrap();
    let (request, _) = ledger.create_request(new_request(BloodGroup::APos, 5)).unwrap();

    let first = ledger
        .accept_request(&donor_a.id, &request.id, 3, None)
        .unwrap();
    let outcome = ledger.confirm_donation(&first.id, None, None).unwrap();
    assert_eq!(outcome.request.status, RequestStatus::Partial);
    assert_eq!(outcome.request.remaining_units(), 2);
    assert!(outcome.assignment.donor_completed);
    assert_eq!(outcome.assignment.units_donated, Some(3));

    let second = ledger
        .accept_request(&donor_b.id, &request.id, 2, None)
        .unwrap();
    let outcome = ledger.confirm_donation(&second.id, Some(2), None).unwrap();
    assert_eq!(outcome.request.status, RequestStatus::Fulfilled);
    assert_eq!(outcome.request.remaining_units(), 0);

    // Donor stats updated by the confirmation.
    let donor_a = ledger.store().donor(&donor_a.id).unwrap().unwrap();
    assert_eq!(donor_a.total_donations, 1);
    assert_eq!(donor_a.last_donation, Some(now().date()));

    // Donated blood passes through the pool: A+ stock dropped by 3, O- by 2.
    let inventory = ledger.store().inventory().unwrap();
    assert_eq!(inventory.units(BloodGroup::APos), 47);
    assert_eq!(inventory.units(BloodGroup::ONeg), 38);

    // Both donations are on the request's fulfilled history.
    let history = ledger.fulfilled_history_for_request(&request.id).unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn confirm_donation_rejects_a_second_completion() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Hyderabad")).unwrap();
    let (request, _) = ledger.create_request(new_request(BloodGroup::APos, 5)).unwrap();
    let assignment = ledger.accept_request(&donor.id, &request.id, 2, None).unwrap();

    ledger.confirm_donation(&assignment.id, None, None).unwrap();
    assert!(matches!(
        ledger.confirm_donation(&assignment.id, None, None),
        Err(LedgerError::AlreadyCompleted(_))
    ));
}

#[test]
fn requestor_confirmation_is_independent_of_donor_completion() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Hyderabad")).unwrap();
    let (request, _) = ledger.create_request(new_request(BloodGroup::APos, 5)).unwrap();
    let assignment = ledger.accept_request(&donor.id, &request.id, 2, None).unwrap();

    let confirmed = ledger.requestor_confirm_donor(&assignment.id).unwrap();
    assert!(confirmed.requestor_confirmed);
    assert!(!confirmed.donor_completed);

    let outcome = ledger.confirm_donation(&assignment.id, None, None).unwrap();
    assert!(outcome.assignment.requestor_confirmed);
    assert!(outcome.assignment.donor_completed);
}

/// Builds a ledger whose only donor last donated `days_ago` days before
/// the pinned clock.
fn ledger_with_donor_who_donated(
    days_ago: i64,
) -> (
    Ledger<MemoryStore, FixedClock, SequentialIdGenerator>,
    bloodsync_model::DonorId,
) {
    let mut ledger = ledger();
    let registered = ledger
        .register_donor(new_donor(BloodGroup::BNeg, "Bangalore"))
        .unwrap();
    let mut donor = ledger.store().donor(&registered.id).unwrap().unwrap();
    donor.last_donation = Some(now().date() - chrono::Duration::days(days_ago));

    let mut store = MemoryStore::with_default_stock();
    store.put_donor(&donor).unwrap();
    let ledger = Ledger::with_parts(
        store,
        FixedClock(now()),
        SequentialIdGenerator::default(),
    );
    (ledger, donor.id)
}

#[test]
fn donate_to_inventory_enforces_the_cooldown() {
    // Donated 10 days ago: still cooling down.
    let (mut ledger, donor_id) = ledger_with_donor_who_donated(10);
    assert!(matches!(
        ledger.donate_to_inventory(&donor_id, 2, None, None),
        Err(LedgerError::CooldownActive)
    ));

    // 60 days ago: eligible again.
    let (mut ledger, donor_id) = ledger_with_donor_who_donated(60);
    let donation = ledger
        .donate_to_inventory(&donor_id, 2, Some("Main Blood Bank".to_string()), None)
        .unwrap();
    assert_eq!(donation.units, 2);
    assert!(donation.request_id.is_none());

    let inventory = ledger.store().inventory().unwrap();
    assert_eq!(inventory.units(BloodGroup::BNeg), 27);
    assert!(inventory.entry(BloodGroup::BNeg).donor_ids.contains(&donor_id));
    let updated = ledger.store().donor(&donor_id).unwrap().unwrap();
    assert_eq!(updated.total_donations, 1);
    assert_eq!(updated.last_donation, Some(now().date()));
}

#[test]
fn donate_to_inventory_bounds_units() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Mumbai")).unwrap();
    assert!(matches!(
        ledger.donate_to_inventory(&donor.id, 0, None, None),
        Err(LedgerError::UnitsOutOfRange { units: 0, .. })
    ));
    assert!(matches!(
        ledger.donate_to_inventory(&donor.id, MAX_INVENTORY_DONATION_UNITS + 1, None, None),
        Err(LedgerError::UnitsOutOfRange { units: 51, .. })
    ));
}

#[test]
fn withdrawal_respects_stock_and_creates_a_fulfilled_request() {
    let mut ledger = ledger();
    let requestor = ledger.register_requestor(new_requestor()).unwrap();

    // Seed O- at exactly 10 units.
    let mut inventory = bloodsync_model::Inventory::empty();
    inventory.entry_mut(BloodGroup::ONeg).credit(10);
    let mut store = MemoryStore::new();
    store.put_inventory(&inventory).unwrap();
    store.put_requestor(&requestor).unwrap();
    let mut ledger = Ledger::with_parts(
        store,
        FixedClock(now()),
        SequentialIdGenerator::default(),
    );

    assert!(matches!(
        ledger.withdraw_from_inventory(&requestor.id, BloodGroup::ONeg, 15, None),
        Err(LedgerError::InsufficientInventory {
            available: 10,
            requested: 15,
            ..
        })
    ));

    let (request, donation) = ledger
        .withdraw_from_inventory(
            &requestor.id,
            BloodGroup::ONeg,
            10,
            Some("Emergency surgery".to_string()),
        )
        .unwrap();
    assert_eq!(request.status, RequestStatus::Fulfilled);
    assert_eq!(request.kind, RequestKind::InventoryWithdrawal);
    assert_eq!(request.fulfilled_units, 10);
    assert_eq!(request.remaining_units(), 0);
    assert_eq!(donation.source, DonationSource::Inventory);

    assert_eq!(ledger.store().inventory().unwrap().units(BloodGroup::ONeg), 0);
    assert_eq!(
        ledger.store().requestor(&requestor.id).unwrap().unwrap().total_requests,
        1
    );
}

#[test]
fn use_inventory_for_request_checks_stock_first() {
    let mut ledger = ledger();
    let (request, _) = ledger.create_request(new_request(BloodGroup::AbNeg, 20)).unwrap();

    // AB- seeds at 15; 20 is too many.
    assert!(matches!(
        ledger.use_inventory_for_request(&request.id, 20),
        Err(LedgerError::InsufficientInventory { available: 15, .. })
    ));

    let updated = ledger.use_inventory_for_request(&request.id, 15).unwrap();
    assert_eq!(updated.status, RequestStatus::Partial);
    assert_eq!(updated.remaining_units(), 5);
    assert_eq!(updated.inventory_used, 15);
    assert_eq!(ledger.store().inventory().unwrap().units(BloodGroup::AbNeg), 0);
}

#[test]
fn zero_unit_offers_and_requests_are_rejected() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Mumbai")).unwrap();
    let (request, _) = ledger.create_request(new_request(BloodGroup::APos, 5)).unwrap();

    assert!(matches!(
        ledger.accept_request(&donor.id, &request.id, 0, None),
        Err(LedgerError::ZeroUnits)
    ));
    assert!(matches!(
        ledger.create_request(new_request(BloodGroup::APos, 0)),
        Err(LedgerError::ZeroUnits)
    ));
}

#[test]
fn profile_update_changes_only_the_given_fields() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Mumbai")).unwrap();

    let updated = ledger
        .update_donor_profile(
            &donor.id,
            bloodsync_model::DonorUpdate {
                city: Some("Pune".to_string()),
                available: Some(false),
                ..bloodsync_model::DonorUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.city, "Pune");
    assert!(!updated.available);
    assert_eq!(updated.phone, donor.phone);
}

#[test]
fn legacy_record_donation_has_no_unit_cap() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Mumbai")).unwrap();

    assert!(matches!(
        ledger.record_donation(&donor.id, 0, None, None),
        Err(LedgerError::ZeroUnits)
    ));
    let donation = ledger
        .record_donation(&donor.id, MAX_INVENTORY_DONATION_UNITS + 25, None, None)
        .unwrap();
    assert_eq!(donation.units, 75);
    assert_eq!(ledger.store().inventory().unwrap().units(BloodGroup::APos), 125);
}

#[test]
fn read_side_queries_join_and_order_history() {
    let mut ledger = ledger();
    let donor = ledger.register_donor(new_donor(BloodGroup::APos, "Hyderabad")).unwrap();
    let requestor = ledger.register_requestor(new_requestor()).unwrap();

    let mut input = new_request(BloodGroup::APos, 5);
    input.requestor_id = Some(requestor.id.clone());
    let (request, _) = ledger.create_request(input).unwrap();
    let assignment = ledger.accept_request(&donor.id, &request.id, 2, None).unwrap();

    // Open assignments show up joined on both sides.
    let for_donor = ledger.assignments_for_donor(&donor.id).unwrap();
    assert_eq!(for_donor.len(), 1);
    assert_eq!(for_donor[0].1.id, request.id);
    let for_request = ledger.assignments_for_request(&request.id).unwrap();
    assert_eq!(for_request.len(), 1);
    assert_eq!(for_request[0].1.id, donor.id);

    ledger.confirm_donation(&assignment.id, None, None).unwrap();

    // Completed assignments drop off the donor's open list.
    assert!(ledger.assignments_for_donor(&donor.id).unwrap().is_empty());

    let history = ledger.donation_history_for_donor(&donor.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].request_id.as_ref(), Some(&request.id));

    let requests = ledger.request_history_for_requestor(&requestor.id).unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, request.id);
}

#[test]
fn missing_entities_surface_as_not_found() {
    let ledger = ledger();
    let missing = bloodsync_model::DonorId::new("DON-MISSING").unwrap();
    assert!(matches!(
        ledger.donor_can_donate_now(&missing),
        Err(LedgerError::NotFound { kind: "donor", .. })
    ));
}
