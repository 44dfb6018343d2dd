//! Request, assignment, and donation lifecycle with inventory accounting.

pub mod clock;
pub mod error;
pub mod idgen;
pub mod ledger;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{LedgerError, Result};
pub use idgen::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use ledger::{ConfirmOutcome, Ledger, MAX_INVENTORY_DONATION_UNITS};
