pub mod eligibility;
pub mod matcher;

pub use eligibility::{
    DONATION_COOLDOWN_DAYS, MAX_SCORE, MIN_SCORE, can_donate_now, eligibility_score,
};
pub use matcher::{
    DonorMatch, EligibleDonor, MAX_MATCHED_DONORS, MatchResult, OpenRequest,
    eligible_donors_for_remaining, find_compatible_donors, match_request,
    open_requests_for_donor, search_donors,
};
