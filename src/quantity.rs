pub mod cost;
pub mod current;
pub mod energy;
pub mod power;
pub mod rate;
pub mod time;
pub mod voltage;

use std::ops::{Div, Mul};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[from(i32, f64, OrderedFloat<f64>)]
#[must_use]
pub struct Quantity<const CURRENT: isize, const POWER: isize, const TIME: isize, const COST: isize>(
    pub OrderedFloat<f64>,
);

impl<const CURRENT: isize, const POWER: isize, const TIME: isize, const COST: isize>
    Quantity<CURRENT, POWER, TIME, COST>
{
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    pub const fn abs(mut self) -> Self {
        self.0 = OrderedFloat(self.0.0.abs());
        self
    }

    /// Round to two decimal places, the precision every reported figure carries.
    pub fn round_to_hundredths(mut self) -> Self {
        self.0 = OrderedFloat((self.0.0 * 100.0).round() / 100.0);
        self
    }
}

impl<const CURRENT: isize, const POWER: isize, const TIME: isize, const COST: isize> Mul<f64>
    for Quantity<CURRENT, POWER, TIME, COST>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const CURRENT: isize, const POWER: isize, const TIME: isize, const COST: isize> Div<f64>
    for Quantity<CURRENT, POWER, TIME, COST>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl<const CURRENT: isize, const POWER: isize, const TIME: isize, const COST: isize> Div<Self>
    for Quantity<CURRENT, POWER, TIME, COST>
{
    type Output = OrderedFloat<f64>;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}
