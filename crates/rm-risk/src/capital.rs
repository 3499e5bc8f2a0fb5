//! Dollar capital plan for a hypothetical investment, including short-sale
//! margin.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rm_types::numeric::round_display;

use crate::exposure::ExposureSummary;

/// Dollar amounts implied by an [`ExposureSummary`] for a base investment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalPlan {
    /// Cash paid to open the longs.
    pub long_dollars: Decimal,
    /// Cash received from selling borrowed shares.
    pub short_dollars: Decimal,
    /// Collateral posted against the shorts.
    pub margin_reserve: Decimal,
    /// `long_dollars - short_dollars + margin_reserve`.
    pub net_capital_required: Decimal,
    /// `long_dollars + short_dollars`.
    pub gross_dollars: Decimal,
    /// The arithmetic above with the numbers substituted, for display.
    pub calculation_steps: Vec<String>,
}

/// Stateless capital requirement calculation.
pub struct CapitalCalculator;

impl CapitalCalculator {
    pub const DISPLAY_DP: u32 = 2;

    pub fn compute(
        exposure: &ExposureSummary,
        investment_amount: Decimal,
        margin_requirement: Decimal,
        currency_symbol: &str,
    ) -> CapitalPlan {
        let long_pct = exposure.long_exposure;
        let short_pct = exposure.short_exposure.abs();

        // Figures beyond the Decimal range clamp to its bounds.
        let long_dollars = (long_pct / Decimal::ONE_HUNDRED).saturating_mul(investment_amount);
        let short_dollars = (short_pct / Decimal::ONE_HUNDRED).saturating_mul(investment_amount);
        let margin_reserve = short_dollars.saturating_mul(margin_requirement);
        let net_capital_required = long_dollars
            .saturating_sub(short_dollars)
            .saturating_add(margin_reserve);
        let gross_dollars = long_dollars.saturating_add(short_dollars);

        let long_dollars = round_display(long_dollars, Self::DISPLAY_DP);
        let short_dollars = round_display(short_dollars, Self::DISPLAY_DP);
        let margin_reserve = round_display(margin_reserve, Self::DISPLAY_DP);
        let net_capital_required = round_display(net_capital_required, Self::DISPLAY_DP);
        let gross_dollars = round_display(gross_dollars, Self::DISPLAY_DP);

        let cur = currency_symbol;
        let amount = investment_amount.normalize();
        let margin_pct =
            round_display(margin_requirement.saturating_mul(Decimal::ONE_HUNDRED), 0);

        let calculation_steps = vec![
            format!(
                "Long positions: {long_pct:.1}% × {cur}{amount} = {cur}{long_dollars:.2} (cash out)"
            ),
            format!(
                "Short positions: {short_pct:.1}% × {cur}{amount} = {cur}{short_dollars:.2} \
                 (cash in from selling borrowed shares)"
            ),
            format!(
                "Margin requirement: {cur}{short_dollars:.2} × {margin_pct}% = \
                 {cur}{margin_reserve:.2} (held as collateral)"
            ),
            format!(
                "Net capital = {cur}{long_dollars:.2} - {cur}{short_dollars:.2} + \
                 {cur}{margin_reserve:.2} = {cur}{net_capital_required:.2}"
            ),
        ];

        CapitalPlan {
            long_dollars,
            short_dollars,
            margin_reserve,
            net_capital_required,
            gross_dollars,
            calculation_steps,
        }
    }
}
