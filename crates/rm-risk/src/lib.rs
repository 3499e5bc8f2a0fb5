//! Portfolio exposure and risk metrics for RationalMarkets trade ideas.
//!
//! Provides:
//! - Long / short / net / gross exposure from percentage allocations
//! - Allocation-weighted portfolio beta, with signed or magnitude weighting
//! - Dollar capital plan for a base investment, including short-sale margin
//! - Per-position breakdown and exposure-limit alerts

pub mod alerts;
pub mod beta;
pub mod breakdown;
pub mod capital;
pub mod config;
pub mod exposure;
pub mod limits;
pub mod metrics;

pub use alerts::{RiskAlert, RiskAlertKind, RiskSeverity};
pub use beta::{BetaAggregator, BetaConvention};
pub use breakdown::PositionBreakdown;
pub use capital::{CapitalCalculator, CapitalPlan};
pub use config::MetricsConfig;
pub use exposure::{ExposureCalculator, ExposureSummary};
pub use limits::{ExposureLimits, LimitChecker};
pub use metrics::{MetricsCalculator, MetricsReport, PortfolioMetrics};
