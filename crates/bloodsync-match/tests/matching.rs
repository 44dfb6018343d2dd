//! Matching-engine behavior over realistic donor pools.

use bloodsync_match::{
    eligibility_score, find_compatible_donors, match_request, open_requests_for_donor,
    search_donors, MAX_MATCHED_DONORS, MAX_SCORE, MIN_SCORE,
};
use bloodsync_model::{
    Assignment, AssignmentId, BloodGroup, BloodRequest, Donor, DonorId, Inventory, NewDonor,
    NewRequest, RequestId, Urgency,
};
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    day(y, m, d).and_hms_opt(9, 0, 0).unwrap()
}

fn donor(id: &str, group: BloodGroup, city: &str) -> Donor {
    Donor::register(
        DonorId::new(id).unwrap(),
        NewDonor {
            name: format!("Donor {id}"),
            email: format!("{id}@example.com"),
            phone: "9876543210".to_string(),
            age: 30,
            gender: "Female".to_string(),
            blood_group: group,
            weight_kg: 62.0,
            address: "12 Main Street".to_string(),
            city: city.to_string(),
            state: "Maharashtra".to_string(),
            pincode: "400001".to_string(),
            medical_history: None,
            emergency_contact: None,
            preferred_contact_time: None,
        },
        at(2024, 1, 15),
    )
    .unwrap()
}

fn request(id: &str, group: BloodGroup, units: u32, urgency: Urgency) -> BloodRequest {
    BloodRequest::open(
        RequestId::new(id).unwrap(),
        NewRequest {
            requestor_id: None,
            patient_name: "Patient".to_string(),
            patient_age: 40,
            patient_gender: "Male".to_string(),
            blood_group: group,
            units_needed: units,
            hospital_name: "City General".to_string(),
            hospital_address: "Hospital Road".to_string(),
            city: String::new(),
            state: String::new(),
            contact_name: "Contact".to_string(),
            contact_phone: "123".to_string(),
            contact_email: None,
            urgency,
            required_date: day(2025, 2, 5),
            reason: None,
        },
        at(2025, 2, 1),
    )
}

#[test]
fn a_pos_request_matches_a_pos_and_o_neg_but_not_b_pos() {
    let a_pos = donor("DON-APOS", BloodGroup::APos, "Mumbai");
    let o_neg = donor("DON-ONEG", BloodGroup::ONeg, "Chennai");
    let b_pos = donor("DON-BPOS", BloodGroup::BPos, "Delhi");
    let donors = vec![a_pos.clone(), o_neg.clone(), b_pos];

    let req = request("BR-1", BloodGroup::APos, 5, Urgency::High);
    let result = match_request(&req, &donors, &Inventory::empty(), day(2025, 2, 1));

    let ids: Vec<&str> = result
        .candidates
        .iter()
        .map(|m| m.donor.id.as_str())
        .collect();
    assert_eq!(result.total_compatible, 2);
    assert!(ids.contains(&"DON-APOS"));
    assert!(ids.contains(&"DON-ONEG"));
    assert!(!ids.contains(&"DON-BPOS"));

    // Ordered by descending score.
    for pair in result.candidates.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(result.fulfillable);
}

#[test]
fn match_request_is_idempotent() {
    let donors: Vec<Donor> = (0..15)
        .map(|i| {
            let mut d = donor(&format!("DON-{i}"), BloodGroup::ONeg, "Mumbai");
            d.total_donations = i % 7;
            if i % 3 == 0 {
                d.last_donation = Some(day(2024, 10, 1 + i));
            }
            d
        })
        .collect();
    let req = request("BR-2", BloodGroup::APos, 4, Urgency::Normal);
    let inventory = Inventory::with_default_stock();
    let today = day(2025, 2, 1);

    let first = match_request(&req, &donors, &inventory, today);
    let second = match_request(&req, &donors, &inventory, today);

    assert_eq!(first.total_compatible, second.total_compatible);
    assert_eq!(first.inventory_units, second.inventory_units);
    assert_eq!(first.candidates.len(), second.candidates.len());
    assert!(first.candidates.len() <= MAX_MATCHED_DONORS);
    for (a, b) in first.candidates.iter().zip(&second.candidates) {
        assert_eq!(a.donor.id, b.donor.id);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn compatible_donors_order_recent_first_never_donated_last() {
    let mut fresh = donor("DON-FRESH", BloodGroup::APos, "Mumbai");
    fresh.last_donation = Some(day(2025, 1, 10));
    let mut stale = donor("DON-STALE", BloodGroup::APos, "Mumbai");
    stale.last_donation = Some(day(2024, 6, 1));
    let never = donor("DON-NEVER", BloodGroup::APos, "Mumbai");

    let donors = vec![never.clone(), fresh.clone(), stale.clone()];
    let found = find_compatible_donors(&donors, BloodGroup::APos, None);
    let ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["DON-FRESH", "DON-STALE", "DON-NEVER"]);
}

#[test]
fn location_filter_is_case_insensitive_substring() {
    let donors = vec![
        donor("DON-MUM", BloodGroup::APos, "Mumbai"),
        donor("DON-DEL", BloodGroup::APos, "Delhi"),
    ];
    let found = find_compatible_donors(&donors, BloodGroup::APos, Some("mumb"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.as_str(), "DON-MUM");

    // State matches too.
    let found = find_compatible_donors(&donors, BloodGroup::APos, Some("MAHARASHTRA"));
    assert_eq!(found.len(), 2);
}

#[test]
fn unavailable_and_inactive_donors_are_excluded() {
    let mut away = donor("DON-AWAY", BloodGroup::APos, "Mumbai");
    away.available = false;
    let mut retired = donor("DON-RET", BloodGroup::APos, "Mumbai");
    retired.status = "inactive".parse().unwrap();
    let donors = vec![away, retired];
    assert!(find_compatible_donors(&donors, BloodGroup::APos, None).is_empty());
}

#[test]
fn inventory_alone_can_make_a_request_fulfillable() {
    let req = request("BR-3", BloodGroup::AbNeg, 5, Urgency::Critical);
    let inventory = Inventory::with_default_stock(); // AB- seeded at 15
    let result = match_request(&req, &[], &inventory, day(2025, 2, 1));
    assert_eq!(result.total_compatible, 0);
    assert_eq!(result.inventory_units, 15);
    assert!(result.fulfillable);

    let empty = match_request(&req, &[], &Inventory::empty(), day(2025, 2, 1));
    assert!(!empty.fulfillable);
}

#[test]
fn open_requests_sort_by_urgency_then_age() {
    let d = donor("DON-1", BloodGroup::ONeg, "Mumbai");
    let mut normal_old = request("BR-NORM", BloodGroup::APos, 2, Urgency::Normal);
    normal_old.created_at = at(2025, 1, 1);
    let mut critical_new = request("BR-CRIT", BloodGroup::BPos, 2, Urgency::Critical);
    critical_new.created_at = at(2025, 2, 1);
    let mut high_old = request("BR-HIGH", BloodGroup::ONeg, 2, Urgency::High);
    high_old.created_at = at(2025, 1, 15);

    let requests = vec![normal_old, critical_new, high_old];
    let open = open_requests_for_donor(&d, &requests, &[]);
    let ids: Vec<&str> = open.iter().map(|o| o.request.id.as_str()).collect();
    assert_eq!(ids, vec!["BR-CRIT", "BR-HIGH", "BR-NORM"]);
    assert!(open.iter().all(|o| o.remaining_units == 2));
}

#[test]
fn assigned_donor_no_longer_sees_the_request() {
    let d = donor("DON-1", BloodGroup::ONeg, "Mumbai");
    let req = request("BR-1", BloodGroup::APos, 2, Urgency::Normal);
    let assignment = Assignment::accepted(
        AssignmentId::new("ASGN-1").unwrap(),
        d.id.clone(),
        req.id.clone(),
        1,
        at(2025, 2, 2),
        None,
    );
    assert_eq!(open_requests_for_donor(&d, std::slice::from_ref(&req), &[]).len(), 1);
    assert!(open_requests_for_donor(&d, &[req], &[assignment]).is_empty());
}

#[test]
fn donor_search_filters_by_group_and_location() {
    let donors = vec![
        donor("DON-1", BloodGroup::APos, "Mumbai"),
        donor("DON-2", BloodGroup::ONeg, "Mumbai"),
        donor("DON-3", BloodGroup::APos, "Delhi"),
    ];

    let all = search_donors(&donors, None, None);
    assert_eq!(all.len(), 3);

    let a_pos = search_donors(&donors, Some(BloodGroup::APos), None);
    assert_eq!(a_pos.len(), 2);

    let a_pos_mumbai = search_donors(&donors, Some(BloodGroup::APos), Some("mumbai"));
    assert_eq!(a_pos_mumbai.len(), 1);
    assert_eq!(a_pos_mumbai[0].id.as_str(), "DON-1");

    // Pincode is searchable too.
    let by_pin = search_donors(&donors, None, Some("400001"));
    assert_eq!(by_pin.len(), 3);
}

proptest! {
    #[test]
    fn score_is_always_clamped(
        age in 0u32..=120,
        available in any::<bool>(),
        total_donations in 0u32..=500,
        days_since in proptest::option::of(0i64..=2000),
    ) {
        let today = day(2025, 2, 1);
        let mut d = donor("DON-P", BloodGroup::OPos, "Mumbai");
        d.age = age;
        d.available = available;
        d.total_donations = total_donations;
        d.last_donation = days_since.map(|n| today - chrono::Duration::days(n));

        let score = eligibility_score(&d, today);
        prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
    }
}
