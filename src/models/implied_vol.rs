//! Implied volatility by bisection
//!
//! Volatility is searched on a percentage scale (0-400% by default). The
//! target price must lie inside the prices of the bracket's ends; the
//! solver never clamps an out-of-range target.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::black_scholes::{option_price, PricingInputs};
use crate::core::{days_to_expiry, ensure_finite, OptionError, OptionQuote, OptionResult, OptionType};

/// Bisection solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvSolverConfig {
    /// Lower end of the volatility bracket, in percent
    /// Default: 0.0
    pub low_vol_pct: f64,

    /// Upper end of the volatility bracket, in percent
    /// Default: 400.0
    pub high_vol_pct: f64,

    /// Maximum number of bisection steps
    /// Default: 20
    pub max_iterations: u32,

    /// Stop once the bracket's price width is below this fraction of the target
    /// Default: 0.001 (0.1%)
    pub price_tolerance: f64,

    /// Decimal places kept on the percentage scale
    /// Default: 2
    pub decimals: u32,
}

impl Default for IvSolverConfig {
    fn default() -> Self {
        Self {
            low_vol_pct: 0.0,
            high_vol_pct: 400.0,
            max_iterations: 20,
            price_tolerance: 0.001,
            decimals: 2,
        }
    }
}

impl IvSolverConfig {
    /// Tighter tolerance and more steps
    pub fn precise() -> Self {
        Self {
            max_iterations: 60,
            price_tolerance: 1e-6,
            decimals: 4,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> OptionResult<()> {
        let low = ensure_finite("low_vol_pct", self.low_vol_pct)?;
        let high = ensure_finite("high_vol_pct", self.high_vol_pct)?;
        if low < 0.0 || high <= low {
            return Err(OptionError::invalid_input(format!(
                "volatility bracket must satisfy 0 <= low < high, got [{low}, {high}]"
            )));
        }
        if ensure_finite("price_tolerance", self.price_tolerance)? <= 0.0 {
            return Err(OptionError::invalid_input("price tolerance must be positive"));
        }
        Ok(())
    }
}

/// How the solver terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Convergence {
    /// At expiry or priced at |S - K|: volatility is 0 without iterating
    Boundary,
    /// Bracket price width fell below tolerance
    Converged,
    /// Step limit reached first; result is the best current midpoint
    IterationCap,
}

/// Solved implied volatility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVol {
    /// Volatility as a fraction (50% = 0.5)
    pub volatility: f64,
    /// Volatility in percent, rounded to the configured decimals
    pub volatility_pct: f64,
    /// Bisection steps taken
    pub iterations: u32,
    pub convergence: Convergence,
}

impl ImpliedVol {
    fn from_pct(pct: f64, decimals: u32, iterations: u32, convergence: Convergence) -> Self {
        let scale = 10f64.powi(decimals as i32);
        let volatility_pct = (pct * scale).round() / scale;
        Self {
            volatility: volatility_pct / 100.0,
            volatility_pct,
            iterations,
            convergence,
        }
    }
}

/// Bracket being narrowed: vols in percent with the prices they produce
#[derive(Debug, Clone, Copy)]
struct BisectionState {
    low_vol: f64,
    high_vol: f64,
    low_price: f64,
    high_price: f64,
    step: u32,
}

impl BisectionState {
    fn mid(&self) -> f64 {
        (self.low_vol + self.high_vol) / 2.0
    }

    fn price_width(&self) -> f64 {
        self.high_price - self.low_price
    }

    /// Keep the half whose price bracket still contains the target
    fn narrow(self, vol: f64, price: f64, target: f64) -> Self {
        if price > target {
            Self {
                high_vol: vol,
                high_price: price,
                step: self.step + 1,
                ..self
            }
        } else {
            Self {
                low_vol: vol,
                low_price: price,
                step: self.step + 1,
                ..self
            }
        }
    }
}

/// Solve for the volatility that reproduces `market_price`.
///
/// `days` is calendar days to expiry. Prices are non-decreasing in
/// volatility, so the target has to sit between the bracket-end prices.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    days: f64,
    option_type: OptionType,
    rate: f64,
    config: &IvSolverConfig,
) -> OptionResult<ImpliedVol> {
    config.validate()?;
    if ensure_finite("market_price", market_price)? < 0.0 {
        return Err(OptionError::invalid_input(format!(
            "market price must be non-negative, got {market_price}"
        )));
    }

    let base = PricingInputs::new(spot, strike, days, 0.0, rate);
    let price_at = |vol_pct: f64| option_price(&base.with_volatility(vol_pct / 100.0), option_type);

    let low_price = price_at(config.low_vol_pct)?;
    let high_price = price_at(config.high_vol_pct)?;

    if market_price < low_price || market_price > high_price {
        return Err(OptionError::BracketViolation {
            target: market_price,
            low_price,
            high_price,
            low_vol: config.low_vol_pct,
            high_vol: config.high_vol_pct,
        });
    }

    // Priced at |S - K|: zero vol, whichever side of the strike spot is on
    if days == 0.0 || (market_price - (spot - strike).abs()).abs() < 1e-12 {
        return Ok(ImpliedVol::from_pct(0.0, config.decimals, 0, Convergence::Boundary));
    }

    let threshold = config.price_tolerance * market_price;
    let mut state = BisectionState {
        low_vol: config.low_vol_pct,
        high_vol: config.high_vol_pct,
        low_price,
        high_price,
        step: 0,
    };

    while state.step < config.max_iterations && state.price_width() >= threshold {
        let vol = state.mid();
        let price = price_at(vol)?;
        state = state.narrow(vol, price, market_price);
    }

    let convergence = if state.price_width() < threshold {
        Convergence::Converged
    } else {
        tracing::warn!(
            "IV bisection hit {} steps for {} K={} price={} (width {:.6})",
            state.step,
            option_type,
            strike,
            market_price,
            state.price_width()
        );
        Convergence::IterationCap
    };

    let solved = ImpliedVol::from_pct(state.mid(), config.decimals, state.step, convergence);
    tracing::debug!(
        "IV {:.2}% for {} K={} after {} steps ({:?})",
        solved.volatility_pct,
        option_type,
        strike,
        solved.iterations,
        solved.convergence
    );
    Ok(solved)
}

/// Solve a quote's implied vol from its bid/ask mid, returning a new quote
pub fn solve_quote_iv(
    quote: &OptionQuote,
    spot: f64,
    trade_date: NaiveDate,
    rate: f64,
    config: &IvSolverConfig,
) -> OptionResult<OptionQuote> {
    let mid = quote.mid().ok_or_else(|| {
        OptionError::invalid_input(format!(
            "{} {}@{} has no usable bid/ask",
            quote.underlying, quote.option_type, quote.strike
        ))
    })?;
    let days = days_to_expiry(quote.expiry, trade_date)?;
    let solved = implied_volatility(mid, spot, quote.strike, days, quote.option_type, rate, config)?;
    Ok(quote.with_implied_vol(solved.volatility))
}
