//! Validated aggregate emission rate

use crate::error::{GeneratorError, RateViolation, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Highest aggregate rate the generator accepts, in logs per second.
pub const MAX_RATE: u32 = 10_000;

/// Aggregate logs-per-second target, always within `1..=MAX_RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Rate(NonZeroU32);

impl Rate {
    pub fn new(rate: i64) -> Result<Self> {
        let invalid = |reason| GeneratorError::InvalidRate { rate, reason };

        if rate > i64::from(MAX_RATE) {
            return Err(invalid(RateViolation::AboveMaximum { max: MAX_RATE }));
        }

        u32::try_from(rate)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or_else(|| invalid(RateViolation::NotPositive))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<i64> for Rate {
    type Error = GeneratorError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rate> for u32 {
    fn from(rate: Rate) -> Self {
        rate.get()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/s", self.0)
    }
}
