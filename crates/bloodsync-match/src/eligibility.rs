//! Donor eligibility: the donation cooldown and the fitness score.

use chrono::NaiveDate;

use bloodsync_model::Donor;

/// Minimum days between whole-blood donations. This is the standard
/// blood-bank interval and is a hard domain rule, deliberately not
/// configurable.
pub const DONATION_COOLDOWN_DAYS: i64 = 56;

/// Days after which a past donation counts as "recent history" rather than
/// a recency concern, earning a small score bonus.
const RECENCY_BONUS_AFTER_DAYS: i64 = 90;

/// Score floor and ceiling.
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 150;

/// Whether a donor may donate today under the 56-day rule.
///
/// Donors with no recorded donation may always donate. Exactly 56 days
/// elapsed is allowed; 55 is not.
pub fn can_donate_now(last_donation: Option<NaiveDate>, today: NaiveDate) -> bool {
    match last_donation {
        None => true,
        Some(last) => (today - last).num_days() >= DONATION_COOLDOWN_DAYS,
    }
}

/// Heuristic fitness score used to rank candidate donors for a request.
///
/// Pure function of the donor record and the current date:
///
/// - base 100
/// - +10 for ages 25–45, −50 below 18 or above 65
/// - −100 when marked unavailable
/// - +5 when the last donation was more than 90 days ago, or +10 for a
///   donor who has never donated (the two are mutually exclusive)
/// - +2 per past donation, capped at +20
/// - clamped to [0, 150]
pub fn eligibility_score(donor: &Donor, today: NaiveDate) -> i32 {
    let mut score = 100;

    if (25..=45).contains(&donor.age) {
        score += 10;
    } else if donor.age < 18 || donor.age > 65 {
        score -= 50;
    }

    if !donor.available {
        score -= 100;
    }

    match donor.last_donation {
        Some(last) => {
            if (today - last).num_days() > RECENCY_BONUS_AFTER_DAYS {
                score += 5;
            }
        }
        // New-donor bonus
        None => score += 10,
    }

    // min(total_donations * 2, 20), computed overflow-safe.
    score += (donor.total_donations.min(10) * 2) as i32;

    score.clamp(MIN_SCORE, MAX_SCORE)
}
