//! Payoff curves
//!
//! Curves are sequences of `(spot, payoff)` points over a linear spot grid.
//! Rendering them is left to the caller.

use serde::{Deserialize, Serialize};

use super::StrategyLeg;
use crate::core::{Direction, OptionError, OptionResult, OptionType};
use crate::models::{option_price, PricingInputs};

/// Payoff grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Number of spot points
    /// Default: 200
    pub points: usize,

    /// Days before expiry for the pre-expiry curves
    /// Default: [7, 21, 63]
    pub pre_expiry_days: Vec<u32>,

    /// Whether to compute pre-expiry curves at all
    /// Default: false
    pub include_pre_expiry: bool,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            points: 200,
            pre_expiry_days: vec![7, 21, 63],
            include_pre_expiry: false,
        }
    }
}

impl PayoffConfig {
    /// Single-option diagram settings
    pub fn single_option() -> Self {
        Self {
            points: 100,
            pre_expiry_days: vec![7, 28, 56],
            include_pre_expiry: false,
        }
    }

    /// Same settings with pre-expiry curves turned on
    pub fn with_pre_expiry(mut self) -> Self {
        self.include_pre_expiry = true;
        self
    }

    pub fn validate(&self) -> OptionResult<()> {
        if self.points < 2 {
            return Err(OptionError::invalid_input(format!(
                "payoff grid needs at least two points, got {}",
                self.points
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffPoint {
    pub spot: f64,
    pub payoff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    /// `None` for the at-expiry curve
    pub days_before_expiry: Option<u32>,
    pub points: Vec<PayoffPoint>,
}

impl PayoffCurve {
    /// Payoff at the grid point nearest `spot`
    pub fn nearest(&self, spot: f64) -> Option<&PayoffPoint> {
        self.points
            .iter()
            .min_by(|a, b| (a.spot - spot).abs().total_cmp(&(b.spot - spot).abs()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffDiagram {
    pub label: String,
    pub at_expiry: PayoffCurve,
    pub pre_expiry: Vec<PayoffCurve>,
}

/// `n` evenly spaced points from `lo` to `hi` inclusive
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + i as f64 * step).collect()
        }
    }
}

/// A leg as seen by the payoff grid
#[derive(Debug, Clone, Copy)]
struct PayoffLeg {
    option_type: OptionType,
    strike: f64,
    volatility: f64,
    ratio: f64,
    /// Days this leg outlives the earliest-expiring leg
    extra_days: f64,
}

/// Payoff diagram of a set of legs.
///
/// The spot grid spans `[min K x (1 - σmax/2), max K x (1 + σmax/2)]`. For
/// a pre-expiry curve at `d` days, each leg is priced with `d` days plus
/// however long it outlives the earliest-expiring leg.
pub fn legs_payoff(
    label: impl Into<String>,
    legs: &[StrategyLeg],
    direction: Direction,
    rate: f64,
    config: &PayoffConfig,
) -> OptionResult<PayoffDiagram> {
    let first_expiry = legs
        .iter()
        .map(|l| l.expiry)
        .min()
        .ok_or_else(|| OptionError::invalid_input("payoff needs at least one leg"))?;

    let payoff_legs = legs
        .iter()
        .map(|leg| {
            leg.validate()?;
            Ok(PayoffLeg {
                option_type: leg.option_type,
                strike: leg.strike,
                volatility: leg.volatility,
                ratio: leg.ratio as f64,
                extra_days: (leg.expiry - first_expiry).num_days() as f64,
            })
        })
        .collect::<OptionResult<Vec<_>>>()?;

    build_diagram(label.into(), &payoff_legs, direction, rate, config)
}

/// Payoff diagram of a single option over `[K(1 - σ/2), K(1 + σ/2)]`
pub fn option_payoff(
    option_type: OptionType,
    strike: f64,
    volatility: f64,
    direction: Direction,
    rate: f64,
    config: &PayoffConfig,
) -> OptionResult<PayoffDiagram> {
    let leg = PayoffLeg {
        option_type,
        strike,
        volatility,
        ratio: 1.0,
        extra_days: 0.0,
    };
    let label = format!("{direction}-{strike}{}", option_type.code());
    build_diagram(label, &[leg], direction, rate, config)
}

fn build_diagram(
    label: String,
    legs: &[PayoffLeg],
    direction: Direction,
    rate: f64,
    config: &PayoffConfig,
) -> OptionResult<PayoffDiagram> {
    config.validate()?;

    let min_strike = legs.iter().map(|l| l.strike).fold(f64::INFINITY, f64::min);
    let max_strike = legs.iter().map(|l| l.strike).fold(f64::NEG_INFINITY, f64::max);
    let max_vol = legs.iter().map(|l| l.volatility).fold(0.0, f64::max);
    if !(min_strike > 0.0 && max_strike.is_finite()) {
        return Err(OptionError::invalid_input("payoff legs need positive strikes"));
    }

    // Spot must stay positive for pre-expiry pricing
    let lo = (min_strike * (1.0 - max_vol / 2.0)).max(min_strike * 0.01);
    let hi = max_strike * (1.0 + max_vol / 2.0);
    let spots = linspace(lo, hi, config.points);
    let sign = direction.sign();

    let at_expiry = PayoffCurve {
        days_before_expiry: None,
        points: spots
            .iter()
            .map(|&spot| {
                let payoff: f64 = legs
                    .iter()
                    .map(|l| l.ratio * l.option_type.intrinsic(spot, l.strike))
                    .sum();
                PayoffPoint {
                    spot,
                    payoff: payoff * sign,
                }
            })
            .collect(),
    };

    let pre_expiry = if config.include_pre_expiry {
        config
            .pre_expiry_days
            .iter()
            .map(|&days| pre_expiry_curve(&spots, legs, days, sign, rate))
            .collect::<OptionResult<Vec<_>>>()?
    } else {
        Vec::new()
    };

    Ok(PayoffDiagram {
        label,
        at_expiry,
        pre_expiry,
    })
}

fn pre_expiry_curve(
    spots: &[f64],
    legs: &[PayoffLeg],
    days: u32,
    sign: f64,
    rate: f64,
) -> OptionResult<PayoffCurve> {
    let points = spots
        .iter()
        .map(|&spot| {
            let mut value = 0.0;
            for leg in legs {
                let inputs = PricingInputs::new(
                    spot,
                    leg.strike,
                    days as f64 + leg.extra_days,
                    leg.volatility,
                    rate,
                );
                value += leg.ratio * option_price(&inputs, leg.option_type)?;
            }
            Ok(PayoffPoint {
                spot,
                payoff: value * sign,
            })
        })
        .collect::<OptionResult<Vec<_>>>()?;

    Ok(PayoffCurve {
        days_before_expiry: Some(days),
        points,
    })
}
