//! Opaque typed identifiers for each entity kind.
//!
//! Ids are caller-supplied strings (the ledger generates prefixed ones, but
//! the model only requires non-emptiness). Each kind gets its own newtype so
//! a donor id cannot be passed where a request id is expected.

use std::fmt;

use crate::error::ModelError;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::InvalidId {
                        kind: $kind,
                        value,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(DonorId, "donor");
entity_id!(RequestorId, "requestor");
entity_id!(RequestId, "request");
entity_id!(DonationId, "donation");
entity_id!(AssignmentId, "assignment");

impl DonorId {
    /// Sentinel used on donation records that draw from the shared pool
    /// rather than a person.
    pub const INVENTORY: &'static str = "INVENTORY";

    pub fn inventory() -> Self {
        Self(Self::INVENTORY.to_string())
    }

    pub fn is_inventory(&self) -> bool {
        self.0 == Self::INVENTORY
    }
}
