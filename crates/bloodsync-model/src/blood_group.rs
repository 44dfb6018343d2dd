//! The 8 ABO/Rh blood groups and their donation compatibility matrix.
//!
//! The two tables are the standard transfusion-medicine rules: O− is the
//! universal donor (may give to every group), AB+ is the universal recipient
//! (may receive from every group). `can_give_to` and `can_receive_from` are
//! exact inverses of each other; `compatibility_tables_are_inverse` in the
//! test module enumerates both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the 8 standard ABO/Rh blood groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

use BloodGroup::{ANeg, APos, AbNeg, AbPos, BNeg, BPos, ONeg, OPos};

impl BloodGroup {
    /// All 8 groups, in the conventional listing order.
    pub const ALL: [BloodGroup; 8] = [APos, ANeg, BPos, BNeg, AbPos, AbNeg, OPos, ONeg];

    /// Returns the display form as written on donor cards ("A+", "O-", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            APos => "A+",
            ANeg => "A-",
            BPos => "B+",
            BNeg => "B-",
            AbPos => "AB+",
            AbNeg => "AB-",
            OPos => "O+",
            ONeg => "O-",
        }
    }

    /// Groups a donor of this type may donate to.
    pub fn can_give_to(self) -> &'static [BloodGroup] {
        match self {
            APos => &[APos, AbPos],
            ANeg => &[APos, ANeg, AbPos, AbNeg],
            BPos => &[BPos, AbPos],
            BNeg => &[BPos, BNeg, AbPos, AbNeg],
            AbPos => &[AbPos],
            AbNeg => &[AbPos, AbNeg],
            OPos => &[OPos, APos, BPos, AbPos],
            // Universal donor
            ONeg => &[OPos, ONeg, APos, ANeg, BPos, BNeg, AbPos, AbNeg],
        }
    }

    /// Groups whose donors may donate to a recipient of this type.
    ///
    /// Exact inverse of [`can_give_to`](Self::can_give_to).
    pub fn can_receive_from(self) -> &'static [BloodGroup] {
        match self {
            APos => &[APos, ANeg, OPos, ONeg],
            ANeg => &[ANeg, ONeg],
            BPos => &[BPos, BNeg, OPos, ONeg],
            BNeg => &[BNeg, ONeg],
            // Universal recipient
            AbPos => &[APos, ANeg, BPos, BNeg, AbPos, AbNeg, OPos, ONeg],
            AbNeg => &[ANeg, BNeg, AbNeg, ONeg],
            OPos => &[OPos, ONeg],
            ONeg => &[ONeg],
        }
    }

    /// True if donors of `donor` may give to recipients of `self`.
    pub fn accepts_donor(self, donor: BloodGroup) -> bool {
        self.can_receive_from().contains(&donor)
    }

    pub fn is_universal_donor(self) -> bool {
        self == ONeg
    }

    pub fn is_universal_recipient(self) -> bool {
        self == AbPos
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = ModelError;

    /// Parse a blood group string, case-insensitively ("ab+" parses to AB+).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A+" => Ok(APos),
            "A-" => Ok(ANeg),
            "B+" => Ok(BPos),
            "B-" => Ok(BNeg),
            "AB+" => Ok(AbPos),
            "AB-" => Ok(AbNeg),
            "O+" => Ok(OPos),
            "O-" => Ok(ONeg),
            _ => Err(ModelError::InvalidBloodGroup(s.to_string())),
        }
    }
}
