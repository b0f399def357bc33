//! Configuration for gamma exposure computation

use serde::{Deserialize, Serialize};

use crate::core::{ensure_finite, OptionError, OptionResult};

/// Upper bound on the number of spot levels in one sweep
pub const MAX_SWEEP_LEVELS: usize = 10_000;

/// GEX and spot-sweep settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GexConfig {
    /// Contract point multiplier
    /// Default: 100
    pub multiplier: f64,

    /// Sweep spans spot x e^x for x in [-range, range)
    /// Default: 0.125
    pub sweep_range: f64,

    /// Step of x between sweep levels
    /// Default: 0.0125 (20 levels)
    pub sweep_step: f64,

    /// Risk-free rate used when re-pricing contracts
    /// Default: 0.0
    pub risk_free_rate: f64,
}

impl Default for GexConfig {
    fn default() -> Self {
        Self {
            multiplier: 100.0,
            sweep_range: 0.125,
            sweep_step: 0.0125,
            risk_free_rate: 0.0,
        }
    }
}

impl GexConfig {
    /// Same span, twice the resolution
    pub fn fine() -> Self {
        Self {
            sweep_step: 0.00625,
            ..Default::default()
        }
    }

    /// Twice the span at the default resolution
    pub fn wide() -> Self {
        Self {
            sweep_range: 0.25,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> OptionResult<()> {
        if ensure_finite("multiplier", self.multiplier)? <= 0.0 {
            return Err(OptionError::invalid_input("multiplier must be positive"));
        }
        let range = ensure_finite("sweep_range", self.sweep_range)?;
        let step = ensure_finite("sweep_step", self.sweep_step)?;
        if range <= 0.0 || step <= 0.0 {
            return Err(OptionError::invalid_input(format!(
                "sweep range and step must be positive, got range={range} step={step}"
            )));
        }
        let levels = 2.0 * range / step;
        if !levels.is_finite() || levels > MAX_SWEEP_LEVELS as f64 {
            return Err(OptionError::invalid_input(format!(
                "sweep range {range} with step {step} exceeds {MAX_SWEEP_LEVELS} levels"
            )));
        }
        ensure_finite("risk_free_rate", self.risk_free_rate)?;
        Ok(())
    }
}
