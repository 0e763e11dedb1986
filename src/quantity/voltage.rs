use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Nameplate line voltage. Plain volts, not a [`super::Quantity`] dimension: it only
/// ever enters the arithmetic through the three-phase power conversion.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, derive_more::FromStr, Serialize, Deserialize,
)]
pub struct Volts(pub u32);

impl Display for Volts {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} V", self.0)
    }
}
