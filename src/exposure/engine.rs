//! GexEngine - facade over exposure, sweep and zero-gamma detection

use serde::{Deserialize, Serialize};

use super::{
    find_zero_crossing, gex_rows, reprice_chain, sweep_gex, GammaExposureRow, GexConfig, GexSweep,
    GexTotals,
};
use crate::core::{OptionError, OptionResult, QuoteChain};

/// Exposure of a chain at a single spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GexSnapshot {
    pub spot: f64,
    pub rows: Vec<GammaExposureRow>,
    pub totals: GexTotals,
}

/// Full gamma profile: exposure at the observed spot, the sweep, and the
/// zero-gamma level if the swept curve changes sign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GammaProfile {
    pub underlying: String,
    pub observed: GexSnapshot,
    pub sweep: GexSweep,
    pub zero_gamma: Option<f64>,
}

/// Gamma exposure engine
pub struct GexEngine {
    config: GexConfig,
}

impl GexEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self {
            config: GexConfig::default(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(config: GexConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &GexConfig {
        &self.config
    }

    /// Update configuration
    pub fn set_config(&mut self, config: GexConfig) {
        self.config = config;
    }

    /// Per-strike exposure at `spot`, Greeks computed from each quote's IV
    pub fn exposure_at(&self, chain: &QuoteChain, spot: f64) -> OptionResult<GexSnapshot> {
        self.config.validate()?;
        if chain.is_empty() {
            return Err(OptionError::invalid_input(format!(
                "{} chain for {} has no quotes",
                chain.underlying, chain.expiry
            )));
        }

        let days = chain.days_to_expiry()?;
        let repriced = reprice_chain(chain, spot, days, self.config.risk_free_rate)?;
        let rows = gex_rows(&repriced, spot, self.config.multiplier);
        Ok(GexSnapshot {
            spot,
            totals: GexTotals::from_rows(&rows),
            rows,
        })
    }

    /// Per-strike exposure at the chain's observed spot
    pub fn exposure(&self, chain: &QuoteChain) -> OptionResult<GexSnapshot> {
        self.exposure_at(chain, chain.spot)
    }

    /// Net GEX across the configured spot grid
    pub fn sweep(&self, chain: &QuoteChain) -> OptionResult<GexSweep> {
        sweep_gex(chain, &self.config)
    }

    /// Zero-gamma level only
    pub fn zero_gamma(&self, chain: &QuoteChain) -> OptionResult<Option<f64>> {
        Ok(find_zero_crossing(&self.sweep(chain)?.net_curve()))
    }

    /// Observed exposure, sweep and zero-gamma level in one pass
    pub fn profile(&self, chain: &QuoteChain) -> OptionResult<GammaProfile> {
        let observed = self.exposure(chain)?;
        let sweep = self.sweep(chain)?;
        let zero_gamma = find_zero_crossing(&sweep.net_curve());

        match zero_gamma {
            Some(level) => tracing::info!(
                "{} {} zero-gamma level {:.2} (spot {:.2}, net GEX {:.2})",
                chain.underlying,
                chain.expiry,
                level,
                chain.spot,
                observed.totals.net_gex
            ),
            None => tracing::warn!(
                "{} {} net GEX keeps one sign across {} sweep levels",
                chain.underlying,
                chain.expiry,
                sweep.levels.len()
            ),
        }

        Ok(GammaProfile {
            underlying: chain.underlying.clone(),
            observed,
            sweep,
            zero_gamma,
        })
    }
}

impl Default for GexEngine {
    fn default() -> Self {
        Self::new()
    }
}
