//! Risk alert types and severity levels.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a risk alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskSeverity {
    /// Informational — within normal operating range.
    Info,
    /// Warning — approaching a limit.
    Warning,
    /// Critical — limit breached.
    Critical,
}

/// Discriminant for the kind of risk alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskAlertKind {
    /// Gross exposure (percentage points) exceeds limit.
    GrossExposureExceeded {
        gross_exposure: Decimal,
        limit: Decimal,
    },
    /// Absolute net exposure (percentage points) exceeds limit.
    NetExposureExceeded {
        net_exposure: Decimal,
        limit: Decimal,
    },
    /// Absolute portfolio beta exceeds limit.
    BetaExceeded {
        portfolio_beta: Decimal,
        limit: Decimal,
    },
    /// A single position's allocation is too concentrated.
    ConcentrationExceeded {
        ticker: String,
        allocation_pct: Decimal,
        limit_pct: Decimal,
    },
    /// Out-of-pocket capital for the plan exceeds limit.
    NetCapitalExceeded {
        net_capital_required: Decimal,
        limit: Decimal,
    },
}

/// A single risk alert raised against a metrics record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub severity: RiskSeverity,
    pub kind: RiskAlertKind,
    pub message: String,
    /// Whether the alert has been acknowledged by a human operator.
    pub acknowledged: bool,
}

impl RiskAlert {
    /// Create a new alert.
    pub fn new(severity: RiskSeverity, kind: RiskAlertKind, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            severity,
            kind,
            message,
            acknowledged: false,
        }
    }

    pub fn acknowledge(&mut self) {
        self.acknowledged = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn severity_ordering() {
        assert!(RiskSeverity::Info < RiskSeverity::Warning);
        assert!(RiskSeverity::Warning < RiskSeverity::Critical);
    }

    #[test]
    fn alert_creation() {
        let mut alert = RiskAlert::new(
            RiskSeverity::Warning,
            RiskAlertKind::BetaExceeded {
                portfolio_beta: dec!(1.7),
                limit: dec!(2.0),
            },
            "Portfolio beta 1.70 approaching 2.00 limit".into(),
        );
        assert_eq!(alert.severity, RiskSeverity::Warning);
        assert!(!alert.acknowledged);

        alert.acknowledge();
        assert!(alert.acknowledged);
    }

    #[test]
    fn alert_kind_is_tagged_in_json() {
        let alert = RiskAlert::new(
            RiskSeverity::Critical,
            RiskAlertKind::ConcentrationExceeded {
                ticker: "AAPL".into(),
                allocation_pct: dec!(60),
                limit_pct: dec!(50),
            },
            "Position AAPL at 60.0% exceeds 50.0% concentration limit".into(),
        );
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["severity"], "Critical");
        assert_eq!(json["kind"]["ConcentrationExceeded"]["ticker"], "AAPL");
    }
}
