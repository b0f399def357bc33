//! Analytics configuration
//!
//! One serde-friendly struct gathering every tunable, with the documented
//! defaults. Missing fields in JSON fall back to their defaults, at the top
//! level and inside each section.

use serde::{Deserialize, Serialize};

use crate::core::{OptionError, OptionResult};
use crate::exposure::GexConfig;
use crate::models::IvSolverConfig;
use crate::strategy::PayoffConfig;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Rate used for pricing, IV solving and strategies
    /// Default: 0.0
    pub risk_free_rate: f64,
    pub iv: IvSolverConfig,
    pub gex: GexConfig,
    pub payoff: PayoffConfig,
}

impl AnalyticsConfig {
    pub fn from_json_str(json: &str) -> OptionResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| OptionError::Serialization(e.to_string()))?;
        config.iv.validate()?;
        config.gex.validate()?;
        config.payoff.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> OptionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| OptionError::Serialization(e.to_string()))
    }

    /// Apply the shared rate to the GEX re-pricing settings
    pub fn gex_config(&self) -> GexConfig {
        GexConfig {
            risk_free_rate: self.risk_free_rate,
            ..self.gex.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.risk_free_rate, 0.0);
        assert_eq!(config.iv.max_iterations, 20);
        assert_eq!(config.gex.multiplier, 100.0);
        assert_eq!(config.payoff.pre_expiry_days, vec![7, 21, 63]);
    }

    #[test]
    fn test_partial_json() {
        let config = AnalyticsConfig::from_json_str(
            r#"{ "risk_free_rate": 0.03, "gex": { "multiplier": 50.0, "sweep_range": 0.2, "sweep_step": 0.01, "risk_free_rate": 0.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.risk_free_rate, 0.03);
        assert_eq!(config.gex.multiplier, 50.0);
        assert_eq!(config.gex_config().risk_free_rate, 0.03);
        assert_eq!(config.iv, IvSolverConfig::default());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config = AnalyticsConfig::from_json_str(
            r#"{ "gex": { "multiplier": 50.0 }, "iv": { "decimals": 4 }, "payoff": { "include_pre_expiry": true } }"#,
        )
        .unwrap();

        assert_eq!(config.gex.multiplier, 50.0);
        assert_eq!(config.gex.sweep_step, 0.0125);
        assert_eq!(config.iv.decimals, 4);
        assert_eq!(config.iv.max_iterations, 20);
        assert!(config.payoff.include_pre_expiry);
        assert_eq!(config.payoff.points, 200);
    }

    #[test]
    fn test_invalid_sections_rejected_on_load() {
        assert!(AnalyticsConfig::from_json_str(r#"{ "payoff": { "points": 1 } }"#).is_err());
        assert!(AnalyticsConfig::from_json_str(r#"{ "iv": { "low_vol_pct": 50.0, "high_vol_pct": 10.0 } }"#).is_err());
        assert!(AnalyticsConfig::from_json_str(r#"{ "gex": { "sweep_step": 0.0 } }"#).is_err());
    }

    #[test]
    fn test_round_trip_and_errors() {
        let json = AnalyticsConfig::default().to_json_string().unwrap();
        assert_eq!(AnalyticsConfig::from_json_str(&json).unwrap(), AnalyticsConfig::default());

        assert!(matches!(
            AnalyticsConfig::from_json_str("{ not json"),
            Err(OptionError::Serialization(_))
        ));
    }
}
