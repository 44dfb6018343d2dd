//! Subcommand implementations.
//!
//! Every command opens the JSON store under the data directory, routes the
//! work through the ledger, and renders the outcome.

use std::path::Path;

use anyhow::{Context, Result};

use bloodsync_ledger::Ledger;
use bloodsync_model::{
    AssignmentId, DonorId, NewDonor, NewRequest, NewRequestor, RequestId, RequestorId,
};
use bloodsync_report::{Statistics, inventory_overview, recent_donations};
use bloodsync_store::JsonFileStore;

use crate::cli::{
    AcceptArgs, ConfirmDonationArgs, ConfirmDonorArgs, CreateRequestArgs, DonateInventoryArgs,
    MatchRequestArgs, OpenRequestsArgs, RegisterDonorArgs, RegisterRequestorArgs, UseInventoryArgs,
    WithdrawArgs,
};
use crate::render;

/// How many transactions the inventory screen shows.
const RECENT_DONATIONS_SHOWN: usize = 50;

fn open_ledger(data_dir: &Path) -> Result<Ledger<JsonFileStore>> {
    let store = JsonFileStore::open(data_dir)
        .with_context(|| format!("cannot open data directory {}", data_dir.display()))?;
    Ok(Ledger::new(store))
}

pub fn run_stats(data_dir: &Path) -> Result<()> {
    let ledger = open_ledger(data_dir)?;
    let stats = Statistics::collect(ledger.store())?;
    render::print_statistics(&stats);
    Ok(())
}

pub fn run_inventory(data_dir: &Path) -> Result<()> {
    let ledger = open_ledger(data_dir)?;
    let rows = inventory_overview(ledger.store())?;
    render::print_inventory(&rows);
    let recent = recent_donations(ledger.store(), RECENT_DONATIONS_SHOWN)?;
    render::print_recent_donations(&recent);
    Ok(())
}

pub fn run_match_request(data_dir: &Path, args: &MatchRequestArgs) -> Result<()> {
    let ledger = open_ledger(data_dir)?;
    let request_id = RequestId::new(&args.request_id)?;
    let result = ledger.match_for_request(&request_id)?;
    render::print_match_result(&result);
    if result.remaining_units > 0 {
        let eligible = ledger.eligible_donors_for_remaining(&request_id)?;
        println!();
        println!("Exact-group donors for the remaining units:");
        render::print_eligible_donors(&eligible);
    }
    Ok(())
}

pub fn run_open_requests(data_dir: &Path, args: &OpenRequestsArgs) -> Result<()> {
    let ledger = open_ledger(data_dir)?;
    let donor_id = DonorId::new(&args.donor_id)?;
    let rows = ledger.open_requests_for_donor(&donor_id)?;
    render::print_open_requests(&rows);
    Ok(())
}

pub fn run_register_donor(data_dir: &Path, args: &RegisterDonorArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let donor = ledger.register_donor(NewDonor {
        name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        age: args.age,
        gender: args.gender.clone(),
        blood_group: args.blood_group,
        weight_kg: args.weight_kg,
        address: args.address.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        pincode: args.pincode.clone(),
        medical_history: args.medical_history.clone(),
        emergency_contact: args.emergency_contact.clone(),
        preferred_contact_time: args.preferred_contact_time.clone(),
    })?;
    println!("Registered donor {} ({})", donor.id, donor.blood_group);
    Ok(())
}

pub fn run_register_requestor(data_dir: &Path, args: &RegisterRequestorArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let requestor = ledger.register_requestor(NewRequestor {
        name: args.name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        organization: args.organization.clone(),
        address: args.address.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        pincode: args.pincode.clone(),
    })?;
    println!(
        "Registered requestor {} ({})",
        requestor.id, requestor.organization
    );
    Ok(())
}

pub fn run_create_request(data_dir: &Path, args: &CreateRequestArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let requestor_id = match &args.requestor_id {
        Some(id) => Some(RequestorId::new(id)?),
        None => None,
    };
    let (request, result) = ledger.create_request(NewRequest {
        requestor_id,
        patient_name: args.patient_name.clone(),
        patient_age: args.patient_age,
        patient_gender: args.patient_gender.clone(),
        blood_group: args.blood_group,
        units_needed: args.units,
        hospital_name: args.hospital_name.clone(),
        hospital_address: args.hospital_address.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        contact_name: args.contact_name.clone(),
        contact_phone: args.contact_phone.clone(),
        contact_email: args.contact_email.clone(),
        urgency: args.urgency,
        required_date: args.required_date,
        reason: args.reason.clone(),
    })?;
    println!(
        "Created request {} for {} unit(s) of {}",
        request.id, request.units_needed, request.blood_group
    );
    render::print_match_result(&result);
    Ok(())
}

pub fn run_accept(data_dir: &Path, args: &AcceptArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let assignment = ledger.accept_request(
        &DonorId::new(&args.donor_id)?,
        &RequestId::new(&args.request_id)?,
        args.units,
        args.notes.clone(),
    )?;
    println!(
        "Created assignment {} ({} unit(s) offered)",
        assignment.id, assignment.units_offered
    );
    Ok(())
}

pub fn run_confirm_donation(data_dir: &Path, args: &ConfirmDonationArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let outcome = ledger.confirm_donation(
        &AssignmentId::new(&args.assignment_id)?,
        args.units,
        args.donation_center.clone(),
    )?;
    println!(
        "Recorded donation {} ({} unit(s)); request {} is {} with {} unit(s) remaining",
        outcome.donation.id,
        outcome.donation.units,
        outcome.request.id,
        outcome.request.status,
        outcome.request.remaining_units()
    );
    Ok(())
}

pub fn run_donate_inventory(data_dir: &Path, args: &DonateInventoryArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let donation = ledger.donate_to_inventory(
        &DonorId::new(&args.donor_id)?,
        args.units,
        args.donation_center.clone(),
        args.notes.clone(),
    )?;
    println!(
        "Recorded donation {}: {} unit(s) of {} added to inventory",
        donation.id, donation.units, donation.blood_group
    );
    Ok(())
}

pub fn run_withdraw(data_dir: &Path, args: &WithdrawArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let (request, donation) = ledger.withdraw_from_inventory(
        &RequestorId::new(&args.requestor_id)?,
        args.blood_group,
        args.units,
        args.reason.clone(),
    )?;
    println!(
        "Withdrew {} unit(s) of {} from inventory (request {}, donation {})",
        donation.units, donation.blood_group, request.id, donation.id
    );
    Ok(())
}

pub fn run_use_inventory(data_dir: &Path, args: &UseInventoryArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let request = ledger.use_inventory_for_request(&RequestId::new(&args.request_id)?, args.units)?;
    println!(
        "Applied {} unit(s) from inventory; request {} is {} with {} unit(s) remaining",
        args.units,
        request.id,
        request.status,
        request.remaining_units()
    );
    Ok(())
}

pub fn run_confirm_donor(data_dir: &Path, args: &ConfirmDonorArgs) -> Result<()> {
    let mut ledger = open_ledger(data_dir)?;
    let assignment = ledger.requestor_confirm_donor(&AssignmentId::new(&args.assignment_id)?)?;
    println!(
        "Confirmed donor {} on assignment {}",
        assignment.donor_id, assignment.id
    );
    Ok(())
}
