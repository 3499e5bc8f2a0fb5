//! Portfolio metrics facade.
//!
//! [`MetricsCalculator`] takes a [`Recommendation`] from the trade analyzer
//! and produces one flat [`PortfolioMetrics`] record: portfolio beta over all
//! positions, exposure over longs and shorts, the capital plan derived from
//! that exposure, and the analyzer's alpha / sentiment / risk level passed
//! through.
//!
//! The computation is pure. Malformed allocations and betas degrade to zero
//! weight or a default beta; nothing here returns an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rm_types::{PositionSet, Recommendation};

use crate::alerts::RiskAlert;
use crate::beta::BetaAggregator;
use crate::breakdown::PositionBreakdown;
use crate::capital::{CapitalCalculator, CapitalPlan};
use crate::config::MetricsConfig;
use crate::exposure::{ExposureCalculator, ExposureSummary};
use crate::limits::LimitChecker;

/// Consolidated metrics for one recommendation. Serializes flat: the
/// exposure and capital fields sit next to `portfolio_beta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub portfolio_beta: Decimal,
    pub alpha: Decimal,
    pub sentiment: String,
    pub risk_level: String,
    #[serde(flatten)]
    pub exposure: ExposureSummary,
    #[serde(flatten)]
    pub capital: CapitalPlan,
}

/// Metrics together with the optional per-position rows and limit alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics: PortfolioMetrics,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<PositionBreakdown>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<RiskAlert>,
}

/// Stateless metrics facade.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compute metrics for `recommendation` under `config`.
    pub fn compute(recommendation: &Recommendation, config: &MetricsConfig) -> PortfolioMetrics {
        let positions = recommendation.position_set();
        Self::compute_for_positions(&positions, recommendation, config)
    }

    /// [`Self::compute`] with a $1000 base investment, 50% margin and signed
    /// beta weights.
    pub fn compute_with_defaults(recommendation: &Recommendation) -> PortfolioMetrics {
        Self::compute(recommendation, &MetricsConfig::default())
    }

    fn compute_for_positions(
        positions: &PositionSet,
        recommendation: &Recommendation,
        config: &MetricsConfig,
    ) -> PortfolioMetrics {
        let portfolio_beta = BetaAggregator::compute(positions.iter(), config.beta_convention);

        // Derivatives feed beta only; their sizing is not linear in allocation.
        let exposure = ExposureCalculator::compute(&positions.longs, &positions.shorts);

        let capital = CapitalCalculator::compute(
            &exposure,
            config.investment_amount,
            config.margin_requirement,
            &config.currency_symbol,
        );

        debug!(
            positions = positions.len(),
            skipped = positions.skipped_count(),
            convention = %config.beta_convention,
            %portfolio_beta,
            net_exposure = %exposure.net_exposure,
            gross_exposure = %exposure.gross_exposure,
            net_capital_required = %capital.net_capital_required,
            "computed portfolio metrics"
        );

        PortfolioMetrics {
            portfolio_beta,
            alpha: recommendation.alpha(),
            sentiment: recommendation.sentiment().to_string(),
            risk_level: recommendation.risk_level().to_string(),
            exposure,
            capital,
        }
    }

    /// One row per position, longs then shorts then derivatives.
    pub fn position_breakdown(
        recommendation: &Recommendation,
        config: &MetricsConfig,
    ) -> Vec<PositionBreakdown> {
        recommendation
            .position_set()
            .iter()
            .map(|p| {
                PositionBreakdown::from_parsed(p, config.beta_convention, config.investment_amount)
            })
            .collect()
    }

    /// Metrics plus, on request, the breakdown and limit alerts. Positions
    /// are parsed once for all three.
    pub fn report(
        recommendation: &Recommendation,
        config: &MetricsConfig,
        include_breakdown: bool,
        include_alerts: bool,
    ) -> MetricsReport {
        let positions = recommendation.position_set();
        let metrics = Self::compute_for_positions(&positions, recommendation, config);

        let breakdown = if include_breakdown {
            positions
                .iter()
                .map(|p| {
                    PositionBreakdown::from_parsed(
                        p,
                        config.beta_convention,
                        config.investment_amount,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        let alerts = if include_alerts {
            LimitChecker::check(&metrics, &positions, &config.limits)
        } else {
            Vec::new()
        };

        MetricsReport {
            metrics,
            breakdown,
            alerts,
        }
    }
}
