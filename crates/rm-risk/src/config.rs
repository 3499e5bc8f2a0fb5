//! Metrics configuration: investment assumptions, beta convention and limits.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use rm_types::numeric::parse_decimal;
use rm_types::{config_error, ConfigError, RmResult};

use crate::beta::BetaConvention;
use crate::limits::ExposureLimits;

pub const DEFAULT_INVESTMENT_AMOUNT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
/// Standard 50% initial margin on short sales.
pub const DEFAULT_MARGIN_REQUIREMENT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

pub const ENV_INVESTMENT_AMOUNT: &str = "RM_INVESTMENT_AMOUNT";
pub const ENV_MARGIN_REQUIREMENT: &str = "RM_MARGIN_REQUIREMENT";
pub const ENV_BETA_CONVENTION: &str = "RM_BETA_CONVENTION";

/// Configuration for [`MetricsCalculator`](crate::MetricsCalculator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Hypothetical base investment the capital plan is sized for.
    pub investment_amount: Decimal,
    /// Fraction of short proceeds posted as collateral.
    pub margin_requirement: Decimal,
    pub beta_convention: BetaConvention,
    /// Prefix for amounts in the calculation steps.
    pub currency_symbol: String,
    pub limits: ExposureLimits,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            investment_amount: DEFAULT_INVESTMENT_AMOUNT,
            margin_requirement: DEFAULT_MARGIN_REQUIREMENT,
            beta_convention: BetaConvention::default(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            limits: ExposureLimits::default(),
        }
    }
}

impl MetricsConfig {
    pub fn from_json_str(json: &str) -> RmResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RmResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading metrics config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn with_investment_amount(mut self, amount: Decimal) -> Self {
        self.investment_amount = amount;
        self
    }

    pub fn with_margin_requirement(mut self, margin: Decimal) -> Self {
        self.margin_requirement = margin;
        self
    }

    pub fn with_beta_convention(mut self, convention: BetaConvention) -> Self {
        self.beta_convention = convention;
        self
    }

    /// Apply `RM_*` environment variables on top of this config.
    pub fn apply_env_overrides(&mut self) -> RmResult<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any key lookup; [`Self::apply_env_overrides`]
    /// uses the process environment.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> RmResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_INVESTMENT_AMOUNT) {
            self.investment_amount = Self::env_decimal(ENV_INVESTMENT_AMOUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MARGIN_REQUIREMENT) {
            self.margin_requirement = Self::env_decimal(ENV_MARGIN_REQUIREMENT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_BETA_CONVENTION) {
            self.beta_convention = raw.parse()?;
        }
        self.validate()
    }

    fn env_decimal(name: &str, raw: &str) -> Result<Decimal, ConfigError> {
        parse_decimal(raw).ok_or_else(|| ConfigError::InvalidEnv {
            name: name.to_string(),
            value: raw.to_string(),
        })
    }

    pub fn validate(&self) -> RmResult<()> {
        if self.investment_amount < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "investment_amount".into(),
                message: format!("must not be negative, got {}", self.investment_amount),
            }
            .into());
        }
        if self.margin_requirement < Decimal::ZERO || self.margin_requirement > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "margin_requirement".into(),
                message: format!("must be between 0 and 1, got {}", self.margin_requirement),
            }
            .into());
        }
        let threshold = self.limits.warning_threshold_pct;
        if threshold <= Decimal::ZERO || threshold > Decimal::ONE {
            return Err(config_error!(
                "limits.warning_threshold_pct must be in (0, 1], got {}",
                threshold
            ));
        }
        Ok(())
    }
}
