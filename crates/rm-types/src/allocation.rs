//! Signed allocations in percentage points.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::numeric::{coerce_decimal, parse_decimal};

/// A signed allocation in percentage points: `25%` is `Percent(25)`, a short
/// of `-15%` is `Percent(-15)`.
///
/// Allocations arrive as strings like `"25%"`; they are converted into this
/// type once, when a [`Position`](crate::Position) is parsed, and kept numeric
/// from then on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    pub fn new(points: Decimal) -> Self {
        Self(points)
    }

    /// Value in percentage points (`25` for 25%).
    pub fn points(self) -> Decimal {
        self.0
    }

    /// Value as a fraction of the portfolio (`0.25` for 25%).
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `None` when the sum does not fit in a [`Decimal`].
    pub fn checked_add(self, rhs: Percent) -> Option<Percent> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Parse `"25%"`, `"-15%"` or a bare `"25"`.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_decimal(raw).map(Self)
    }

    /// Interpret a raw `allocation` field.
    ///
    /// An absent or `null` field means `"0%"`. A field that is present but
    /// does not coerce gives `None`, and the position is left out of every
    /// sum.
    pub fn from_allocation(value: Option<&Value>) -> Option<Self> {
        match value {
            None | Some(Value::Null) => Some(Self::ZERO),
            Some(v) => coerce_decimal(v).map(Self),
        }
    }
}

impl From<Decimal> for Percent {
    fn from(points: Decimal) -> Self {
        Self(points)
    }
}

/// Saturates at the [`Decimal`] bounds instead of panicking.
impl Add for Percent {
    type Output = Percent;

    fn add(self, rhs: Percent) -> Percent {
        Percent(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Percent {
    fn sum<I: Iterator<Item = Percent>>(iter: I) -> Percent {
        iter.fold(Percent::ZERO, Add::add)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}%", p, self.0),
            None => write!(f, "{}%", self.0),
        }
    }
}
