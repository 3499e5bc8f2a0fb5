use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::numeric::coerce_or;
use crate::position::{Position, PositionSet};

pub const DEFAULT_SENTIMENT: &str = "NEUTRAL";
pub const DEFAULT_RISK_LEVEL: &str = "MODERATE";

/// Structured output of the trade-idea analyzer, enriched with market data.
///
/// Every list may be missing or `null`. The simpler analyzer variant names
/// the lists `longPositions` / `shortPositions`; both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, alias = "longPositions")]
    pub longs: Option<Vec<Position>>,
    #[serde(default, alias = "shortPositions")]
    pub shorts: Option<Vec<Position>>,
    #[serde(default)]
    pub derivatives: Option<Vec<Position>>,
    /// Expected alpha in percent, as a number or numeric string.
    #[serde(default)]
    pub alpha: Option<Value>,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
}

impl Recommendation {
    pub fn new(longs: Vec<Position>, shorts: Vec<Position>) -> Self {
        Self {
            longs: Some(longs),
            shorts: Some(shorts),
            ..Default::default()
        }
    }

    pub fn with_derivatives(mut self, derivatives: Vec<Position>) -> Self {
        self.derivatives = Some(derivatives);
        self
    }

    pub fn longs(&self) -> &[Position] {
        self.longs.as_deref().unwrap_or_default()
    }

    pub fn shorts(&self) -> &[Position] {
        self.shorts.as_deref().unwrap_or_default()
    }

    pub fn derivatives(&self) -> &[Position] {
        self.derivatives.as_deref().unwrap_or_default()
    }

    /// Alpha coerced to a number; 0 when absent or not numeric.
    pub fn alpha(&self) -> Decimal {
        coerce_or(self.alpha.as_ref(), Decimal::ZERO)
    }

    pub fn sentiment(&self) -> &str {
        self.sentiment.as_deref().unwrap_or(DEFAULT_SENTIMENT)
    }

    pub fn risk_level(&self) -> &str {
        self.risk_level.as_deref().unwrap_or(DEFAULT_RISK_LEVEL)
    }

    /// Parse every position once, keeping list membership.
    pub fn position_set(&self) -> PositionSet {
        PositionSet::parse(self.longs(), self.shorts(), self.derivatives())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn empty_document_uses_defaults() {
        let rec: Recommendation = serde_json::from_value(json!({})).unwrap();
        assert!(rec.longs().is_empty());
        assert!(rec.shorts().is_empty());
        assert!(rec.derivatives().is_empty());
        assert_eq!(rec.alpha(), Decimal::ZERO);
        assert_eq!(rec.sentiment(), "NEUTRAL");
        assert_eq!(rec.risk_level(), "MODERATE");
    }

    #[test]
    fn null_lists_and_fields_behave_as_absent() {
        let rec: Recommendation = serde_json::from_value(json!({
            "longs": null,
            "shorts": null,
            "derivatives": null,
            "alpha": null,
            "sentiment": null,
            "riskLevel": null
        }))
        .unwrap();
        assert!(rec.position_set().is_empty());
        assert_eq!(rec.sentiment(), DEFAULT_SENTIMENT);
        assert_eq!(rec.risk_level(), DEFAULT_RISK_LEVEL);
    }

    #[test]
    fn reads_analyzer_output() {
        let rec: Recommendation = serde_json::from_value(json!({
            "tradeName": "AI Bubble Short",
            "recommendation": "RECOMMENDED",
            "riskLevel": "HIGH",
            "sentiment": "BEARISH",
            "alpha": "2.5%",
            "longs": [{"ticker": "GLD", "allocation": "60%", "beta": 0.1}],
            "shorts": [{"ticker": "NVDA", "allocation": "-30%", "beta": "N/A"}],
            "derivatives": [{"ticker": "SPY Put", "allocation": "10%", "positionType": "long"}]
        }))
        .unwrap();

        assert_eq!(rec.longs().len(), 1);
        assert_eq!(rec.shorts()[0].ticker, "NVDA");
        assert_eq!(rec.derivatives().len(), 1);
        assert_eq!(rec.alpha(), dec!(2.5));
        assert_eq!(rec.sentiment(), "BEARISH");
        assert_eq!(rec.risk_level(), "HIGH");
    }

    #[test]
    fn accepts_long_positions_alias() {
        let rec: Recommendation = serde_json::from_value(json!({
            "longPositions": [{"symbol": "AAPL", "allocation": "100%"}],
            "shortPositions": [{"symbol": "TSLA", "allocation": "-20%"}]
        }))
        .unwrap();

        assert_eq!(rec.longs()[0].ticker, "AAPL");
        assert_eq!(rec.shorts()[0].ticker, "TSLA");
    }
}
