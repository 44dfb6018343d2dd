use thiserror::Error;

use bloodsync_model::{BloodGroup, ModelError};
use bloodsync_store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("units must be greater than zero")]
    ZeroUnits,
    #[error("units must be between 1 and {max}, got {units}")]
    UnitsOutOfRange { units: u32, max: u32 },
    #[error("only {available} unit(s) of {group} available, requested {requested}")]
    InsufficientInventory {
        group: BloodGroup,
        available: u32,
        requested: u32,
    },
    #[error("donor must wait 56 days between donations")]
    CooldownActive,
    #[error("assignment already completed: {0}")]
    AlreadyCompleted(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
