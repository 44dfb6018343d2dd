//! Identifier generation.
//!
//! The ledger only requires uniqueness; the default generator produces the
//! human-recognizable prefixed form used throughout the data files
//! (`DON-1A2B3C4D`, `BR-…`, …).

use bloodsync_model::{AssignmentId, DonationId, DonorId, RequestId, RequestorId};

pub trait IdGenerator {
    fn donor_id(&mut self) -> DonorId;
    fn requestor_id(&mut self) -> RequestorId;
    fn request_id(&mut self) -> RequestId;
    fn donation_id(&mut self) -> DonationId;
    fn assignment_id(&mut self) -> AssignmentId;
}

/// Random ids: an entity-kind prefix plus 8 uppercase hex characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

fn prefixed(prefix: &str) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", hex[..8].to_uppercase())
}

impl IdGenerator for UuidIdGenerator {
    fn donor_id(&mut self) -> DonorId {
        DonorId::new(prefixed("DON")).expect("generated id is non-empty")
    }

    fn requestor_id(&mut self) -> RequestorId {
        RequestorId::new(prefixed("REQ")).expect("generated id is non-empty")
    }

    fn request_id(&mut self) -> RequestId {
        RequestId::new(prefixed("BR")).expect("generated id is non-empty")
    }

    fn donation_id(&mut self) -> DonationId {
        DonationId::new(prefixed("DN")).expect("generated id is non-empty")
    }

    fn assignment_id(&mut self) -> AssignmentId {
        AssignmentId::new(prefixed("ASGN")).expect("generated id is non-empty")
    }
}

/// Deterministic sequential ids for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIdGenerator {
    next: u32,
}

impl SequentialIdGenerator {
    fn next(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{prefix}-{:04}", self.next)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn donor_id(&mut self) -> DonorId {
        DonorId::new(self.next("DON")).expect("generated id is non-empty")
    }

    fn requestor_id(&mut self) -> RequestorId {
        RequestorId::new(self.next("REQ")).expect("generated id is non-empty")
    }

    fn request_id(&mut self) -> RequestId {
        RequestId::new(self.next("BR")).expect("generated id is non-empty")
    }

    fn donation_id(&mut self) -> DonationId {
        DonationId::new(self.next("DN")).expect("generated id is non-empty")
    }

    fn assignment_id(&mut self) -> AssignmentId {
        AssignmentId::new(self.next("ASGN")).expect("generated id is non-empty")
    }
}
