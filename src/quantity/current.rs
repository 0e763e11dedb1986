use std::fmt::{Debug, Display, Formatter};

use crate::quantity::{Quantity, power::Kilowatts, voltage::Volts};

pub type Amperes = Quantity<1, 0, 0, 0>;

/// √3, for balanced three-phase loads.
const SQRT_3: f64 = 1.732_050_808;

impl Amperes {
    /// Real power drawn by a balanced three-phase load at the given line voltage.
    pub fn three_phase_power(self, voltage: Volts) -> Kilowatts {
        Kilowatts::from(self.0.0 * f64::from(voltage.0) * SQRT_3 / 1000.0)
    }
}

impl Display for Amperes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} A", self.0)
    }
}

impl Debug for Amperes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}A", self.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_three_phase_power() {
        let power = Amperes::from(10.0).three_phase_power(Volts(480));
        assert_abs_diff_eq!(power.0.0, 8.313_843_878_4, epsilon = 1e-9);
    }
}
