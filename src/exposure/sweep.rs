//! Spot sweep
//!
//! Re-prices the whole chain at each level of a geometric spot grid. Levels
//! are independent, so they are evaluated in parallel and collected back in
//! ascending spot order.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{
    gex_rows, reprice_chain, GammaExposureRow, GexConfig, GexTotals, RepricedStrike, MAX_SWEEP_LEVELS,
};
use crate::core::{OptionError, OptionResult, QuoteChain};

/// Geometric grid `spot x e^x` for x in `[-range, range)` stepping by `step`,
/// capped at `MAX_SWEEP_LEVELS` levels
pub fn spot_levels(spot: f64, range: f64, step: f64) -> Vec<f64> {
    let count = ((2.0 * range / step) - 1e-9)
        .ceil()
        .clamp(0.0, MAX_SWEEP_LEVELS as f64) as usize;
    (0..count)
        .map(|i| spot * (-range + i as f64 * step).exp())
        .collect()
}

/// Chain state at one hypothetical spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepLevel {
    pub spot: f64,
    pub totals: GexTotals,
    pub rows: Vec<GammaExposureRow>,
    pub repriced: Vec<RepricedStrike>,
}

/// Result of sweeping a chain across spot levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GexSweep {
    /// Levels in ascending spot order
    pub levels: Vec<SweepLevel>,
    /// Strikes, ascending (columns of `net_grid`)
    pub strikes: Vec<f64>,
    /// Net GEX grid [level, strike]
    pub net_grid: Array2<f64>,
}

impl GexSweep {
    /// `(spot, net_gex)` curve
    pub fn net_curve(&self) -> Vec<(f64, f64)> {
        self.levels.iter().map(|l| (l.spot, l.totals.net_gex)).collect()
    }

    /// `(spot, call_gex)` curve
    pub fn call_curve(&self) -> Vec<(f64, f64)> {
        self.levels.iter().map(|l| (l.spot, l.totals.call_gex)).collect()
    }

    /// `(spot, put_gex)` curve
    pub fn put_curve(&self) -> Vec<(f64, f64)> {
        self.levels.iter().map(|l| (l.spot, l.totals.put_gex)).collect()
    }
}

/// Sweep a chain around its observed spot.
///
/// Days to expiry come from the chain's expiry/trade-date pair. Implied vols
/// are held at their observed values across all levels.
pub fn sweep_gex(chain: &QuoteChain, config: &GexConfig) -> OptionResult<GexSweep> {
    config.validate()?;
    if chain.is_empty() {
        return Err(OptionError::invalid_input(format!(
            "{} chain for {} has no quotes",
            chain.underlying, chain.expiry
        )));
    }

    let days = chain.days_to_expiry()?;
    let grid = spot_levels(chain.spot, config.sweep_range, config.sweep_step);
    tracing::debug!(
        "Sweeping {} {} over {} levels x {} quotes ({} days)",
        chain.underlying,
        chain.expiry,
        grid.len(),
        chain.len(),
        days
    );

    let levels: Vec<SweepLevel> = grid
        .par_iter()
        .map(|&spot| -> OptionResult<SweepLevel> {
            let repriced = reprice_chain(chain, spot, days, config.risk_free_rate)?;
            let rows = gex_rows(&repriced, spot, config.multiplier);
            Ok(SweepLevel {
                spot,
                totals: GexTotals::from_rows(&rows),
                rows,
                repriced,
            })
        })
        .collect::<OptionResult<Vec<_>>>()?;

    let strikes: Vec<f64> = levels
        .first()
        .map(|l| l.rows.iter().map(|r| r.strike).collect())
        .unwrap_or_default();
    let net_grid = Array2::from_shape_fn((levels.len(), strikes.len()), |(li, si)| {
        levels[li].rows[si].net_gex
    });

    Ok(GexSweep {
        levels,
        strikes,
        net_grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_default_grid() {
        let levels = spot_levels(100.0, 0.125, 0.0125);

        assert_eq!(levels.len(), 20);
        assert_relative_eq!(levels[0], 100.0 * (-0.125_f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(levels[10], 100.0, epsilon = 1e-9);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
        // Upper end excluded
        assert!(*levels.last().unwrap() < 100.0 * 0.125_f64.exp());
    }

    #[test]
    fn test_tiny_step_is_capped_and_rejected() {
        assert_eq!(spot_levels(100.0, 0.125, 1e-300).len(), MAX_SWEEP_LEVELS);

        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 3, 29).unwrap();
        let mut chain = QuoteChain::new("SPX", 100.0, expiry, day);
        chain.add_pair(100.0, 0.2, 10, 0.2, 10).unwrap();
        let config = GexConfig {
            sweep_step: 1e-300,
            ..Default::default()
        };
        assert!(matches!(sweep_gex(&chain, &config), Err(OptionError::InvalidInput(_))));
    }

    #[test]
    fn test_sweep_shapes() {
        let trade = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 3, 29).unwrap();
        let mut chain = QuoteChain::new("SPX", 100.0, expiry, trade);
        for (k, oi) in [(90.0, 100), (100.0, 200), (110.0, 300)] {
            chain.add_pair(k, 0.2, oi, 0.25, oi).unwrap();
        }

        let sweep = sweep_gex(&chain, &GexConfig::default()).unwrap();

        assert_eq!(sweep.levels.len(), 20);
        assert_eq!(sweep.strikes, vec![90.0, 100.0, 110.0]);
        assert_eq!(sweep.net_grid.dim(), (20, 3));
        for (li, level) in sweep.levels.iter().enumerate() {
            let row_sum: f64 = sweep.net_grid.row(li).sum();
            assert_relative_eq!(row_sum, level.totals.net_gex, epsilon = 1e-6);
        }
        assert_eq!(sweep.net_curve().len(), 20);
        for ((call, put), net) in sweep.call_curve().iter().zip(sweep.put_curve()).zip(sweep.net_curve()) {
            assert_eq!(call.0, net.0);
            assert!(call.1 >= 0.0 && put.1 <= 0.0);
            assert_relative_eq!(call.1 + put.1, net.1, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sweep_matches_sequential_evaluation() {
        let trade = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
        let mut chain = QuoteChain::new("SPX", 100.0, expiry, trade);
        chain.add_pair(95.0, 0.3, 50, 0.35, 400).unwrap();
        chain.add_pair(105.0, 0.2, 600, 0.22, 30).unwrap();

        let config = GexConfig::default();
        let sweep = sweep_gex(&chain, &config).unwrap();
        let days = chain.days_to_expiry().unwrap();

        for level in &sweep.levels {
            let repriced = reprice_chain(&chain, level.spot, days, 0.0).unwrap();
            let totals = GexTotals::from_rows(&gex_rows(&repriced, level.spot, 100.0));
            assert_eq!(totals, level.totals);
        }
    }

    #[test]
    fn test_empty_chain_rejected() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let chain = QuoteChain::new("SPX", 100.0, day, day);
        assert!(sweep_gex(&chain, &GexConfig::default()).is_err());
    }
}
