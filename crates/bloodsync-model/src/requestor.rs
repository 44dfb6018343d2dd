//! Requestors: hospitals or individuals who file blood requests.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ids::RequestorId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requestor {
    pub id: RequestorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub registered_at: NaiveDateTime,
    pub total_requests: u32,
}

/// Registration input for a new requestor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRequestor {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_organization")]
    pub organization: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

fn default_organization() -> String {
    "Individual".to_string()
}

impl Requestor {
    pub fn register(id: RequestorId, input: NewRequestor, registered_at: NaiveDateTime) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            organization: input.organization,
            address: input.address,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            registered_at,
            total_requests: 0,
        }
    }
}
