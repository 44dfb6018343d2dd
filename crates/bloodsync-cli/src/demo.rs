//! Seeds a data directory with a small, self-consistent sample data set:
//! six donors across the major groups, one hospital requestor, and one open
//! A+ request with its matched donors cached.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use bloodsync_model::{
    BloodGroup, BloodRequest, Donor, DonorId, DonorStatus, RequestId, RequestKind, RequestStatus,
    Requestor, RequestorId, Urgency,
};
use bloodsync_store::{JsonFileStore, Store};

pub fn run_demo_data(data_dir: &Path) -> Result<()> {
    let mut store = JsonFileStore::open(data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
    if !store.donors()?.is_empty() {
        println!(
            "{} already holds donor data; leaving it untouched",
            data_dir.display()
        );
        return Ok(());
    }

    let donors = sample_donors()?;
    let mut inventory = store.inventory()?;
    for donor in &donors {
        store.put_donor(donor)?;
        inventory.entry_mut(donor.blood_group).record_donor(&donor.id);
    }
    store.put_inventory(&inventory)?;

    let requestor = sample_requestor()?;
    store.put_requestor(&requestor)?;
    store.put_request(&sample_request(&requestor, &donors)?)?;

    println!(
        "Seeded {} donors, 1 requestor, and 1 open request into {}",
        donors.len(),
        data_dir.display()
    );
    Ok(())
}

struct DonorSeed {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    age: u32,
    gender: &'static str,
    blood_group: BloodGroup,
    weight_kg: f64,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    pincode: &'static str,
    total_donations: u32,
    last_donation: Option<&'static str>,
    registered_at: &'static str,
    emergency_contact: &'static str,
    preferred_contact_time: &'static str,
}

const DONOR_SEEDS: [DonorSeed; 6] = [
    DonorSeed {
        id: "DON-A1B2C3D4",
        name: "Rahul Sharma",
        email: "rahul@example.com",
        phone: "9876543210",
        age: 28,
        gender: "Male",
        blood_group: BloodGroup::OPos,
        weight_kg: 70.0,
        address: "123 Main Street",
        city: "Mumbai",
        state: "Maharashtra",
        pincode: "400001",
        total_donations: 5,
        last_donation: Some("2024-12-01"),
        registered_at: "2024-01-15 10:30:00",
        emergency_contact: "9876543211",
        preferred_contact_time: "Evening",
    },
    DonorSeed {
        id: "DON-E5F6G7H8",
        name: "Priya Patel",
        email: "priya@example.com",
        phone: "8765432109",
        age: 32,
        gender: "Female",
        blood_group: BloodGroup::APos,
        weight_kg: 58.0,
        address: "456 Park Avenue",
        city: "Delhi",
        state: "Delhi",
        pincode: "110001",
        total_donations: 3,
        last_donation: Some("2025-01-10"),
        registered_at: "2024-03-20 14:15:00",
        emergency_contact: "8765432110",
        preferred_contact_time: "Morning",
    },
    DonorSeed {
        id: "DON-A2B3C4D5",
        name: "Anjali Gupta",
        email: "anjali@example.com",
        phone: "7654321098",
        age: 26,
        gender: "Female",
        blood_group: BloodGroup::ANeg,
        weight_kg: 55.0,
        address: "789 Gandhi Road",
        city: "Mumbai",
        state: "Maharashtra",
        pincode: "400002",
        total_donations: 2,
        last_donation: None,
        registered_at: "2024-06-10 09:00:00",
        emergency_contact: "7654321099",
        preferred_contact_time: "Anytime",
    },
    DonorSeed {
        id: "DON-I9J0K1L2",
        name: "Amit Kumar",
        email: "amit@example.com",
        phone: "6543210987",
        age: 25,
        gender: "Male",
        blood_group: BloodGroup::BNeg,
        weight_kg: 72.0,
        address: "321 Lake View",
        city: "Bangalore",
        state: "Karnataka",
        pincode: "560001",
        total_donations: 2,
        last_donation: None,
        registered_at: "2024-06-10 09:00:00",
        emergency_contact: "6543210988",
        preferred_contact_time: "Anytime",
    },
    DonorSeed {
        id: "DON-M3N4O5P6",
        name: "Sneha Gupta",
        email: "sneha@example.com",
        phone: "5432109876",
        age: 29,
        gender: "Female",
        blood_group: BloodGroup::ONeg,
        weight_kg: 55.0,
        address: "654 Hillside",
        city: "Chennai",
        state: "Tamil Nadu",
        pincode: "600001",
        total_donations: 8,
        last_donation: Some("2025-01-15"),
        registered_at: "2023-08-05 16:45:00",
        emergency_contact: "5432109877",
        preferred_contact_time: "Afternoon",
    },
    DonorSeed {
        id: "DON-Q7R8S9T0",
        name: "Vikram Singh",
        email: "vikram@example.com",
        phone: "4321098765",
        age: 35,
        gender: "Male",
        blood_group: BloodGroup::AbPos,
        weight_kg: 80.0,
        address: "987 River Road",
        city: "Pune",
        state: "Maharashtra",
        pincode: "411001",
        total_donations: 4,
        last_donation: Some("2024-11-20"),
        registered_at: "2024-02-28 11:20:00",
        emergency_contact: "4321098766",
        preferred_contact_time: "Evening",
    },
];

fn sample_donors() -> Result<Vec<Donor>> {
    DONOR_SEEDS
        .iter()
        .map(|seed| {
            Ok(Donor {
                id: DonorId::new(seed.id)?,
                name: seed.name.to_string(),
                email: seed.email.to_string(),
                phone: seed.phone.to_string(),
                age: seed.age,
                gender: seed.gender.to_string(),
                blood_group: seed.blood_group,
                weight_kg: seed.weight_kg,
                address: seed.address.to_string(),
                city: seed.city.to_string(),
                state: seed.state.to_string(),
                pincode: seed.pincode.to_string(),
                medical_history: None,
                emergency_contact: Some(seed.emergency_contact.to_string()),
                preferred_contact_time: Some(seed.preferred_contact_time.to_string()),
                available: true,
                status: DonorStatus::Active,
                total_donations: seed.total_donations,
                last_donation: seed.last_donation.map(date).transpose()?,
                registered_at: datetime(seed.registered_at)?,
            })
        })
        .collect()
}

fn sample_requestor() -> Result<Requestor> {
    Ok(Requestor {
        id: RequestorId::new("REQ-X1Y2Z3A4")?,
        name: "Dr. Meera Reddy".to_string(),
        email: "meera@hospital.com".to_string(),
        phone: "3210987654".to_string(),
        organization: "City General Hospital".to_string(),
        address: "Hospital Road".to_string(),
        city: "Hyderabad".to_string(),
        state: "Telangana".to_string(),
        pincode: "500001".to_string(),
        registered_at: datetime("2024-04-10 08:30:00")?,
        total_requests: 1,
    })
}

/// An open A+ request; the cached matches cover the A+, A-, O+, and O-
/// sample donors.
fn sample_request(requestor: &Requestor, donors: &[Donor]) -> Result<BloodRequest> {
    let matched_donors = donors
        .iter()
        .filter(|d| d.blood_group.can_give_to().contains(&BloodGroup::APos))
        .map(|d| d.id.clone())
        .collect();
    Ok(BloodRequest {
        id: RequestId::new("BR-B5C6D7E8")?,
        requestor_id: Some(requestor.id.clone()),
        patient_name: "Ramesh Iyer".to_string(),
        patient_age: 45,
        patient_gender: "Male".to_string(),
        blood_group: BloodGroup::APos,
        units_needed: 5,
        fulfilled_units: 0,
        inventory_used: 0,
        hospital_name: "City General Hospital".to_string(),
        hospital_address: "Hospital Road, Hyderabad".to_string(),
        city: "Hyderabad".to_string(),
        state: "Telangana".to_string(),
        contact_name: "Dr. Meera Reddy".to_string(),
        contact_phone: "3210987654".to_string(),
        contact_email: Some("meera@hospital.com".to_string()),
        urgency: Urgency::High,
        required_date: date("2025-02-05")?,
        reason: Some("Surgery".to_string()),
        status: RequestStatus::Pending,
        kind: RequestKind::Standard,
        created_at: datetime("2025-02-01 09:00:00")?,
        matched_donors,
    })
}

fn date(s: &str) -> Result<NaiveDate> {
    s.parse::<NaiveDate>()
        .with_context(|| format!("bad seed date: {s}"))
}

fn datetime(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("bad seed timestamp: {s}"))
}
