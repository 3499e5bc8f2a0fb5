//! Exposure limits and the checks that turn a metrics record into alerts.
//!
//! [`LimitChecker::check`] is a separate step from metric computation: the
//! metrics record stays a pure function of its input, and alerts (which carry
//! ids and timestamps) are produced only when a caller asks for them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rm_types::PositionSet;

use crate::alerts::{RiskAlert, RiskAlertKind, RiskSeverity};
use crate::metrics::PortfolioMetrics;

/// Configurable exposure limits. `None` disables a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposureLimits {
    /// Fraction of a limit at which a *warning* fires (e.g. 0.80 = 80%).
    pub warning_threshold_pct: Decimal,
    /// Maximum gross exposure, percentage points.
    pub max_gross_exposure: Option<Decimal>,
    /// Maximum absolute net exposure, percentage points.
    pub max_net_exposure: Option<Decimal>,
    /// Maximum absolute portfolio beta.
    pub max_portfolio_beta: Option<Decimal>,
    /// Maximum absolute allocation of any single position, percentage points.
    pub max_position_concentration: Option<Decimal>,
    /// Maximum net capital required, in currency units.
    pub max_net_capital: Option<Decimal>,
}

impl Default for ExposureLimits {
    fn default() -> Self {
        Self {
            warning_threshold_pct: Decimal::new(80, 2),        // 80%
            max_gross_exposure: Some(Decimal::from(200)),      // 200% gross
            max_net_exposure: None,
            max_portfolio_beta: Some(Decimal::from(2)),
            max_position_concentration: Some(Decimal::from(50)), // 50% in one name
            max_net_capital: None,
        }
    }
}

/// Stateless limit evaluation.
pub struct LimitChecker;

impl LimitChecker {
    /// Check `metrics` (and the positions it was computed from) against
    /// `limits`, returning every alert raised.
    pub fn check(
        metrics: &PortfolioMetrics,
        positions: &PositionSet,
        limits: &ExposureLimits,
    ) -> Vec<RiskAlert> {
        let mut alerts = Vec::new();
        let threshold = limits.warning_threshold_pct;

        if let Some(limit) = limits.max_gross_exposure {
            let ge = metrics.exposure.gross_exposure;
            if let Some(severity) = Self::severity(ge, limit, threshold) {
                alerts.push(Self::emit(RiskAlert::new(
                    severity,
                    RiskAlertKind::GrossExposureExceeded {
                        gross_exposure: ge,
                        limit,
                    },
                    format!(
                        "Gross exposure {:.1}% {} {:.1}% limit",
                        ge,
                        Self::verb(severity),
                        limit
                    ),
                )));
            }
        }

        if let Some(limit) = limits.max_net_exposure {
            let ne = metrics.exposure.net_exposure;
            if let Some(severity) = Self::severity(ne.abs(), limit, threshold) {
                alerts.push(Self::emit(RiskAlert::new(
                    severity,
                    RiskAlertKind::NetExposureExceeded {
                        net_exposure: ne,
                        limit,
                    },
                    format!(
                        "Net exposure {:.1}% {} ±{:.1}% limit",
                        ne,
                        Self::verb(severity),
                        limit
                    ),
                )));
            }
        }

        if let Some(limit) = limits.max_portfolio_beta {
            let beta = metrics.portfolio_beta;
            if let Some(severity) = Self::severity(beta.abs(), limit, threshold) {
                alerts.push(Self::emit(RiskAlert::new(
                    severity,
                    RiskAlertKind::BetaExceeded {
                        portfolio_beta: beta,
                        limit,
                    },
                    format!(
                        "Portfolio beta {:.2} {} ±{:.2} limit",
                        beta,
                        Self::verb(severity),
                        limit
                    ),
                )));
            }
        }

        if let Some(limit) = limits.max_position_concentration {
            for position in positions.iter() {
                let Some(allocation) = position.allocation else {
                    continue;
                };
                let pct = allocation.abs().points();
                if let Some(severity) = Self::severity(pct, limit, threshold) {
                    alerts.push(Self::emit(RiskAlert::new(
                        severity,
                        RiskAlertKind::ConcentrationExceeded {
                            ticker: position.ticker.clone(),
                            allocation_pct: pct,
                            limit_pct: limit,
                        },
                        format!(
                            "Position {} at {:.1}% {} {:.1}% concentration limit",
                            position.ticker,
                            pct,
                            Self::verb(severity),
                            limit
                        ),
                    )));
                }
            }
        }

        if let Some(limit) = limits.max_net_capital {
            let capital = metrics.capital.net_capital_required;
            if let Some(severity) = Self::severity(capital, limit, threshold) {
                alerts.push(Self::emit(RiskAlert::new(
                    severity,
                    RiskAlertKind::NetCapitalExceeded {
                        net_capital_required: capital,
                        limit,
                    },
                    format!(
                        "Net capital required {:.2} {} {:.2} limit",
                        capital,
                        Self::verb(severity),
                        limit
                    ),
                )));
            }
        }

        alerts
    }

    /// `Critical` at or above the limit, `Warning` at or above
    /// `limit * threshold`. A non-positive limit only fires once it is
    /// actually reached.
    fn severity(value: Decimal, limit: Decimal, threshold: Decimal) -> Option<RiskSeverity> {
        if value >= limit {
            Some(RiskSeverity::Critical)
        } else if limit > Decimal::ZERO && value >= limit.saturating_mul(threshold) {
            Some(RiskSeverity::Warning)
        } else {
            None
        }
    }

    fn verb(severity: RiskSeverity) -> &'static str {
        match severity {
            RiskSeverity::Critical => "exceeds",
            _ => "approaching",
        }
    }

    fn emit(alert: RiskAlert) -> RiskAlert {
        match alert.severity {
            RiskSeverity::Critical => warn!(%alert.message, "RISK CRITICAL"),
            RiskSeverity::Warning => warn!(%alert.message, "RISK WARNING"),
            RiskSeverity::Info => info!(%alert.message, "RISK INFO"),
        }
        alert
    }
}
