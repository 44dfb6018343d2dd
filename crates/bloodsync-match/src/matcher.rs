//! The matching engine: compatible-donor search, request matching, and the
//! inverse donor-side queries.
//!
//! Everything here is a pure function over snapshots handed in by the
//! caller — no ambient state — so two runs over unchanged data produce
//! identical output.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use bloodsync_model::{Assignment, BloodGroup, BloodRequest, Donor, Inventory};

use crate::eligibility::{can_donate_now, eligibility_score};

/// Ranked match lists are truncated to this many candidates.
pub const MAX_MATCHED_DONORS: usize = 10;

/// A candidate donor annotated with its ranking data.
#[derive(Debug, Clone, Serialize)]
pub struct DonorMatch {
    pub donor: Donor,
    pub score: i32,
    pub can_donate_now: bool,
}

/// Outcome of matching one request against the donor pool and inventory.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Stock currently held for the request's exact group.
    pub inventory_units: u32,
    /// Top candidates, best score first, at most [`MAX_MATCHED_DONORS`].
    pub candidates: Vec<DonorMatch>,
    /// Compatible-donor count before truncation.
    pub total_compatible: usize,
    pub remaining_units: u32,
    /// Best-effort reachability flag, not a guarantee: the request looks
    /// satisfiable from stock alone or there is at least one candidate.
    pub fulfillable: bool,
}

/// An open request annotated for a browsing donor.
#[derive(Debug, Clone, Serialize)]
pub struct OpenRequest {
    pub request: BloodRequest,
    pub remaining_units: u32,
}

/// An exact-group donor annotated for a request's remaining units.
#[derive(Debug, Clone, Serialize)]
pub struct EligibleDonor {
    pub donor: Donor,
    pub can_donate_now: bool,
    pub already_assigned: bool,
}

fn location_matches(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.to_lowercase();
    haystacks
        .iter()
        .any(|hay| hay.to_lowercase().contains(&needle))
}

/// Donors who may give to `recipient_group`, available and active, optionally
/// filtered to a location (case-insensitive substring of city or state).
///
/// Ordered by `last_donation` descending; donors who have never donated sort
/// last.
pub fn find_compatible_donors<'a>(
    donors: &'a [Donor],
    recipient_group: BloodGroup,
    location: Option<&str>,
) -> Vec<&'a Donor> {
    let accepted = recipient_group.can_receive_from();
    let mut matches: Vec<&Donor> = donors
        .iter()
        .filter(|donor| accepted.contains(&donor.blood_group))
        .filter(|donor| donor.is_matchable())
        .filter(|donor| match location {
            Some(needle) if !needle.trim().is_empty() => {
                location_matches(needle, &[&donor.city, &donor.state])
            }
            _ => true,
        })
        .collect();

    // Option<NaiveDate> orders None first, so a descending sort puts the
    // never-donated last, as required.
    matches.sort_by(|a, b| b.last_donation.cmp(&a.last_donation));
    matches
}

/// Match a request against the donor pool and inventory snapshot.
///
/// Candidates are scored, stably sorted by score descending (ties keep the
/// compatible-donor ordering), and truncated to the top 10. Deterministic:
/// repeated calls over unchanged inputs yield identical results.
pub fn match_request(
    request: &BloodRequest,
    donors: &[Donor],
    inventory: &Inventory,
    today: NaiveDate,
) -> MatchResult {
    let location = if request.city.trim().is_empty() {
        None
    } else {
        Some(request.city.as_str())
    };
    let compatible = find_compatible_donors(donors, request.blood_group, location);

    let mut candidates: Vec<DonorMatch> = compatible
        .into_iter()
        .map(|donor| DonorMatch {
            score: eligibility_score(donor, today),
            can_donate_now: can_donate_now(donor.last_donation, today),
            donor: donor.clone(),
        })
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let total_compatible = candidates.len();
    candidates.truncate(MAX_MATCHED_DONORS);

    let inventory_units = inventory.units(request.blood_group);
    let remaining_units = request.remaining_units();
    let fulfillable = inventory_units >= remaining_units || total_compatible > 0;

    debug!(
        request = %request.id,
        group = %request.blood_group,
        total_compatible,
        inventory_units,
        remaining_units,
        fulfillable,
        "matched request"
    );

    MatchResult {
        inventory_units,
        candidates,
        total_compatible,
        remaining_units,
        fulfillable,
    }
}

/// Open requests a donor could serve: group compatible, still accepting
/// units, and the donor not already assigned. Ordered by urgency (critical
/// first), then oldest first.
pub fn open_requests_for_donor(
    donor: &Donor,
    requests: &[BloodRequest],
    assignments: &[Assignment],
) -> Vec<OpenRequest> {
    let serves = donor.blood_group.can_give_to();
    let mut open: Vec<OpenRequest> = requests
        .iter()
        .filter(|request| serves.contains(&request.blood_group))
        .filter(|request| request.status.is_open())
        .filter(|request| {
            !assignments
                .iter()
                .any(|a| a.donor_id == donor.id && a.request_id == request.id)
        })
        .map(|request| OpenRequest {
            remaining_units: request.remaining_units(),
            request: request.clone(),
        })
        .collect();

    open.sort_by_key(|entry| (entry.request.urgency.rank(), entry.request.created_at));
    open
}

/// Exact-group donors who could cover a request's remaining units.
///
/// Empty when nothing remains. Donors who can donate now sort first, then by
/// donation history descending.
pub fn eligible_donors_for_remaining(
    request: &BloodRequest,
    donors: &[Donor],
    assignments: &[Assignment],
    today: NaiveDate,
) -> Vec<EligibleDonor> {
    if request.remaining_units() == 0 {
        return Vec::new();
    }

    let mut eligible: Vec<EligibleDonor> = donors
        .iter()
        .filter(|donor| donor.blood_group == request.blood_group)
        .filter(|donor| donor.is_matchable())
        .map(|donor| EligibleDonor {
            can_donate_now: can_donate_now(donor.last_donation, today),
            already_assigned: assignments
                .iter()
                .any(|a| a.donor_id == donor.id && a.request_id == request.id),
            donor: donor.clone(),
        })
        .collect();

    eligible.sort_by_key(|e| (!e.can_donate_now, std::cmp::Reverse(e.donor.total_donations)));
    eligible
}

/// The donor-search screen's filter: optional exact group, optional location
/// substring over city, state, or pincode; only matchable donors.
pub fn search_donors<'a>(
    donors: &'a [Donor],
    group: Option<BloodGroup>,
    location: Option<&str>,
) -> Vec<&'a Donor> {
    donors
        .iter()
        .filter(|donor| donor.is_matchable())
        .filter(|donor| group.is_none_or(|g| donor.blood_group == g))
        .filter(|donor| match location {
            Some(needle) if !needle.trim().is_empty() => {
                location_matches(needle, &[&donor.city, &donor.state, &donor.pincode])
            }
            _ => true,
        })
        .collect()
}
