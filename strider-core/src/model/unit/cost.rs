use std::fmt::Display;

use derive_more::{Add, Neg, Sub, Sum};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// a unitless search score. wrapping [`OrderedFloat`] gives the total
/// ordering the open-set heap requires of its priorities.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Add, Sub, Sum, Neg, Serialize, Deserialize,
)]
pub struct Cost(OrderedFloat<f64>);

impl Cost {
    /// zero cost, unit of addition
    pub const ZERO: Cost = Cost(OrderedFloat(0.0));

    /// sentinel for unvisited links and forbidden transitions
    pub const INFINITY: Cost = Cost(OrderedFloat(f64::INFINITY));

    pub fn new(value: f64) -> Cost {
        Cost(OrderedFloat(value))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Cost(OrderedFloat(value))
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
