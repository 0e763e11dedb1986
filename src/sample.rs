use chrono::NaiveDateTime;

use crate::quantity::current::Amperes;

/// One logger reading: a timestamp and the measured current draw.
///
/// The raw series only lives until the weekly profile is built; the builder consumes
/// it by value so nothing large is retained afterwards.
#[derive(Copy, Clone, Debug)]
pub struct RawSample {
    pub timestamp: NaiveDateTime,
    pub current: Amperes,
}

impl RawSample {
    pub const fn new(timestamp: NaiveDateTime, current: Amperes) -> Self {
        Self { timestamp, current }
    }
}
