//! Long / short / net / gross exposure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use rm_types::numeric::round_display;
use rm_types::{ParsedPosition, Percent};

/// Exposure percentages, in percentage points, rounded to one decimal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureSummary {
    /// Sum of long allocations.
    pub long_exposure: Decimal,
    /// Sum of short allocations (negative by convention).
    pub short_exposure: Decimal,
    /// `long_exposure + short_exposure`.
    pub net_exposure: Decimal,
    /// `long_exposure + |short_exposure|`.
    pub gross_exposure: Decimal,
}

/// Stateless exposure aggregation over parsed positions.
pub struct ExposureCalculator;

impl ExposureCalculator {
    pub const DISPLAY_DP: u32 = 1;

    /// Sum longs and shorts into an [`ExposureSummary`].
    ///
    /// Signs are taken as given: shorts are expected to carry negative
    /// allocations and are not re-negated. Skipped positions contribute
    /// nothing, and neither does a position whose allocation would overflow
    /// the running total.
    pub fn compute(longs: &[ParsedPosition], shorts: &[ParsedPosition]) -> ExposureSummary {
        let long_total = Self::sum_allocations(longs).points();
        let short_total = Self::sum_allocations(shorts).points();

        // Net and gross come from the unrounded totals; each figure is
        // rounded once.
        let net_total = long_total.saturating_add(short_total);
        let gross_total = long_total.saturating_add(short_total.abs());

        ExposureSummary {
            long_exposure: round_display(long_total, Self::DISPLAY_DP),
            short_exposure: round_display(short_total, Self::DISPLAY_DP),
            net_exposure: round_display(net_total, Self::DISPLAY_DP),
            gross_exposure: round_display(gross_total, Self::DISPLAY_DP),
        }
    }

    fn sum_allocations(positions: &[ParsedPosition]) -> Percent {
        positions
            .iter()
            .filter_map(|p| p.allocation.map(|a| (p, a)))
            .fold(Percent::ZERO, |total, (position, allocation)| {
                match total.checked_add(allocation) {
                    Some(sum) => sum,
                    None => {
                        warn!(
                            ticker = %position.ticker,
                            %allocation,
                            "allocation overflows exposure total, skipping"
                        );
                        total
                    }
                }
            })
    }
}
