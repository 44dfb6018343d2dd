use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid blood group: {0:?}")]
    InvalidBloodGroup(String),
    #[error("donor age must be between 18 and 65 years, got {0}")]
    AgeOutOfRange(u32),
    #[error("donor weight must be at least 50 kg, got {0}")]
    WeightBelowMinimum(f64),
    #[error("invalid {kind} id: {value:?}")]
    InvalidId { kind: &'static str, value: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
