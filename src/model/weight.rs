//! Weight: a strictly positive, finite quantity.

use std::{fmt, iter::Sum};

use serde::{Deserialize, Serialize};

/// A cargo weight or a carrying capacity.
///
/// Only finite values greater than zero are admitted. Both item weights and
/// mover limits use this type, so a limit of zero can never be stored.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Returns the raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Rejected weight value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("weight must be a finite number greater than zero, got {0}")]
pub struct InvalidWeight(pub f64);

impl TryFrom<f64> for Weight {
    type Error = InvalidWeight;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidWeight(value))
        }
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum of weights. Not itself a `Weight`: an empty sum is zero.
impl Sum<Weight> for f64 {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.map(Weight::get).sum()
    }
}
