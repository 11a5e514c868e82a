use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, ValueObject};

/// A discount percentage, always finite and within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(DomainError::validation(format!(
                "discount percentage must be between 0 and 100 (got {value})"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl ValueObject for Percentage {}

impl TryFrom<f64> for Percentage {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

impl core::fmt::Display for Percentage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
