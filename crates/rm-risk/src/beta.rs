//! Allocation-weighted portfolio beta.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use rm_types::numeric::round_display;
use rm_types::{ConfigError, ParsedPosition};

/// How a short position's weight enters the beta sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetaConvention {
    /// Weights keep their sign, so a short with positive beta lowers
    /// portfolio beta: the short hedges market exposure.
    #[default]
    Signed,
    /// Weights are taken as absolute values, so every position adds beta:
    /// shorts count as extra risk regardless of direction.
    Magnitude,
}

impl BetaConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetaConvention::Signed => "signed",
            BetaConvention::Magnitude => "magnitude",
        }
    }
}

impl fmt::Display for BetaConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetaConvention {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signed" => Ok(BetaConvention::Signed),
            "magnitude" | "absolute" => Ok(BetaConvention::Magnitude),
            other => Err(ConfigError::UnknownBetaConvention(other.to_string())),
        }
    }
}

/// Stateless beta aggregation.
pub struct BetaAggregator;

impl BetaAggregator {
    pub const DISPLAY_DP: u32 = 2;

    /// Weight a position contributes under `convention`, as a fraction.
    /// `None` for a skipped position.
    pub fn weight(position: &ParsedPosition, convention: BetaConvention) -> Option<Decimal> {
        let fraction = position.allocation?.fraction();
        Some(match convention {
            BetaConvention::Signed => fraction,
            BetaConvention::Magnitude => fraction.abs(),
        })
    }

    /// `weight * beta` for one position. `None` when the position is skipped
    /// or the product does not fit in a [`Decimal`].
    pub fn checked_contribution(
        position: &ParsedPosition,
        convention: BetaConvention,
    ) -> Option<Decimal> {
        Self::weight(position, convention)?.checked_mul(position.beta)
    }

    /// `weight * beta` for one position; zero when skipped.
    pub fn contribution(position: &ParsedPosition, convention: BetaConvention) -> Decimal {
        Self::checked_contribution(position, convention).unwrap_or(Decimal::ZERO)
    }

    /// Portfolio beta over every position (longs, shorts and derivatives),
    /// rounded to two decimals.
    ///
    /// A position whose contribution overflows, alone or added to the running
    /// total, is left out like a malformed one.
    pub fn compute<'a, I>(positions: I, convention: BetaConvention) -> Decimal
    where
        I: IntoIterator<Item = &'a ParsedPosition>,
    {
        let total = positions
            .into_iter()
            .filter(|p| !p.is_skipped())
            .fold(Decimal::ZERO, |total, p| {
                match Self::checked_contribution(p, convention)
                    .and_then(|c| total.checked_add(c))
                {
                    Some(sum) => sum,
                    None => {
                        warn!(
                            ticker = %p.ticker,
                            beta = %p.beta,
                            "beta contribution overflows, skipping"
                        );
                        total
                    }
                }
            });
        round_display(total, Self::DISPLAY_DP)
    }
}
