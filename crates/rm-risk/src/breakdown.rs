//! Per-position view of a recommendation: weight, beta contribution and the
//! dollar size and share quantity for the configured investment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rm_types::numeric::round_display;
use rm_types::{ParsedPosition, PositionSide};

use crate::beta::{BetaAggregator, BetaConvention};

/// One row of the per-position breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBreakdown {
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub side: PositionSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_type: Option<String>,
    /// Allocation in percentage points; `None` when it could not be parsed.
    pub allocation: Option<Decimal>,
    /// Weight used in the beta sum under the configured convention.
    pub weight: Option<Decimal>,
    pub beta: Decimal,
    pub beta_defaulted: bool,
    pub beta_contribution: Decimal,
    /// Dollar size of the position; derivatives have none.
    pub dollars: Option<Decimal>,
    pub price: Option<Decimal>,
    /// `dollars / price`, fractional shares allowed.
    pub quantity: Option<Decimal>,
}

impl PositionBreakdown {
    pub const CONTRIBUTION_DP: u32 = 4;
    pub const DOLLAR_DP: u32 = 2;
    pub const QUANTITY_DP: u32 = 6;

    pub fn from_parsed(
        position: &ParsedPosition,
        convention: BetaConvention,
        investment_amount: Decimal,
    ) -> Self {
        let weight = BetaAggregator::weight(position, convention);
        let beta_contribution = round_display(
            BetaAggregator::contribution(position, convention),
            Self::CONTRIBUTION_DP,
        );

        let dollars = match position.side {
            PositionSide::Derivative => None,
            PositionSide::Long | PositionSide::Short => position.allocation.map(|a| {
                round_display(
                    a.abs().fraction().saturating_mul(investment_amount),
                    Self::DOLLAR_DP,
                )
            }),
        };

        let quantity = match (dollars, position.price) {
            (Some(d), Some(p)) => d
                .checked_div(p)
                .map(|q| round_display(q, Self::QUANTITY_DP)),
            _ => None,
        };

        Self {
            ticker: position.ticker.clone(),
            name: position.name.clone(),
            side: position.side,
            security_type: position.security_type.clone(),
            position_type: position.position_type.clone(),
            allocation: position.allocation.map(|a| a.points()),
            weight,
            beta: position.beta,
            beta_defaulted: position.beta_defaulted,
            beta_contribution,
            dollars,
            price: position.price,
            quantity,
        }
    }
}
