use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::allocation::Percent;
use crate::numeric::coerce_decimal;

/// Beta used when a position has none, or one that is not a number.
pub const DEFAULT_BETA: Decimal = Decimal::ONE;

/// Which list of the recommendation a position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
    Derivative,
}

/// A recommended position exactly as the analyzer produced it.
///
/// `allocation` and `beta` stay raw JSON here; [`ParsedPosition`] is the
/// normalized form the calculators work on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, alias = "symbol")]
    pub ticker: String,
    /// Percentage string such as `"25%"` or `"-15%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_type: Option<String>,
    /// Set by the analyzer for derivatives ("long" / "short").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Last price from market-data enrichment.
    #[serde(default, alias = "price", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Value>,
}

impl Position {
    pub fn new(ticker: &str, allocation: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            allocation: Some(Value::String(allocation.to_string())),
            ..Default::default()
        }
    }

    pub fn with_beta(mut self, beta: impl Into<Value>) -> Self {
        self.beta = Some(beta.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<Value>) -> Self {
        self.current_price = Some(price.into());
        self
    }
}

/// A position after its allocation, beta and price have been coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedPosition {
    pub ticker: String,
    pub name: Option<String>,
    pub side: PositionSide,
    pub security_type: Option<String>,
    pub position_type: Option<String>,
    /// `None` when the raw allocation was present but unparseable; such a
    /// position contributes nothing to exposure, beta or capital.
    pub allocation: Option<Percent>,
    pub beta: Decimal,
    /// True when `beta` is [`DEFAULT_BETA`] because the raw value was missing
    /// or not numeric.
    pub beta_defaulted: bool,
    /// Enriched price, only when strictly positive.
    pub price: Option<Decimal>,
}

impl ParsedPosition {
    pub fn from_position(position: &Position, side: PositionSide) -> Self {
        let allocation = Percent::from_allocation(position.allocation.as_ref());
        if allocation.is_none() {
            debug!(
                ticker = %position.ticker,
                raw = ?position.allocation,
                "skipping position with unparseable allocation"
            );
        }

        let parsed_beta = position.beta.as_ref().and_then(coerce_decimal);
        let beta_defaulted = parsed_beta.is_none();
        if beta_defaulted && position.beta.is_some() {
            debug!(
                ticker = %position.ticker,
                raw = ?position.beta,
                "non-numeric beta, using default"
            );
        }

        let price = position
            .current_price
            .as_ref()
            .and_then(coerce_decimal)
            .filter(|p| *p > Decimal::ZERO);

        Self {
            ticker: position.ticker.clone(),
            name: position.name.clone(),
            side,
            security_type: position.security_type.clone(),
            position_type: position.position_type.clone(),
            allocation,
            beta: parsed_beta.unwrap_or(DEFAULT_BETA),
            beta_defaulted,
            price,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.allocation.is_none()
    }
}

/// The three position lists of a recommendation, parsed once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSet {
    pub longs: Vec<ParsedPosition>,
    pub shorts: Vec<ParsedPosition>,
    pub derivatives: Vec<ParsedPosition>,
}

impl PositionSet {
    pub fn parse(longs: &[Position], shorts: &[Position], derivatives: &[Position]) -> Self {
        let parse_side = |positions: &[Position], side| {
            positions
                .iter()
                .map(|p| ParsedPosition::from_position(p, side))
                .collect::<Vec<_>>()
        };

        Self {
            longs: parse_side(longs, PositionSide::Long),
            shorts: parse_side(shorts, PositionSide::Short),
            derivatives: parse_side(derivatives, PositionSide::Derivative),
        }
    }

    /// Longs, then shorts, then derivatives.
    pub fn iter(&self) -> impl Iterator<Item = &ParsedPosition> {
        self.longs
            .iter()
            .chain(self.shorts.iter())
            .chain(self.derivatives.iter())
    }

    pub fn len(&self) -> usize {
        self.longs.len() + self.shorts.len() + self.derivatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn skipped_count(&self) -> usize {
        self.iter().filter(|p| p.is_skipped()).count()
    }
}
