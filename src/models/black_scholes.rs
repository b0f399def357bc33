//! Black-Scholes Model
//!
//! Closed-form European option pricing with Greeks:
//! - Call/put price from d1, d2 with a single continuous risk-free rate
//! - Delta, per-day theta, per-point vega and gamma
//! - Intrinsic-value fallback at expiry or zero volatility
//!
//! Time to expiry is supplied in calendar days and converted with a
//! 365-day year.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;

use crate::core::{
    days_to_expiry, ensure_finite, EnrichedQuote, OptionError, OptionResult, OptionType,
    PricingResult, QuoteChain,
};

/// Days per year used to annualise time to expiry
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Inputs for pricing one strike/expiry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Calendar days to expiry
    pub time_to_expiry_days: f64,
    /// Volatility as a fraction (50% = 0.5)
    pub volatility: f64,
    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,
}

impl PricingInputs {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry_days: f64,
        volatility: f64,
        risk_free_rate: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry_days,
            volatility,
            risk_free_rate,
        }
    }

    /// Same inputs at a different volatility
    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self {
            volatility,
            ..*self
        }
    }

    /// Time to expiry in years
    pub fn years(&self) -> f64 {
        self.time_to_expiry_days / DAYS_PER_YEAR
    }

    /// At expiry or zero volatility: d1/d2 are undefined
    pub fn is_degenerate(&self) -> bool {
        self.time_to_expiry_days == 0.0 || self.volatility == 0.0
    }

    pub fn validate(&self) -> OptionResult<()> {
        if ensure_finite("spot", self.spot)? <= 0.0 {
            return Err(OptionError::invalid_input(format!(
                "spot must be positive, got {}",
                self.spot
            )));
        }
        if ensure_finite("strike", self.strike)? <= 0.0 {
            return Err(OptionError::invalid_input(format!(
                "strike must be positive, got {}",
                self.strike
            )));
        }
        if ensure_finite("time_to_expiry_days", self.time_to_expiry_days)? < 0.0 {
            return Err(OptionError::invalid_input(format!(
                "time to expiry must be non-negative, got {} days",
                self.time_to_expiry_days
            )));
        }
        if ensure_finite("volatility", self.volatility)? < 0.0 {
            return Err(OptionError::invalid_input(format!(
                "volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        ensure_finite("risk_free_rate", self.risk_free_rate)?;
        Ok(())
    }
}

/// Black-Scholes d1 and d2. Only meaningful for non-degenerate inputs.
pub fn d1_d2(inputs: &PricingInputs) -> (f64, f64) {
    let time = inputs.years();
    let vol_sqrt_t = inputs.volatility * time.sqrt();
    let d1 = ((inputs.spot / inputs.strike).ln()
        + time * (inputs.risk_free_rate + 0.5 * inputs.volatility * inputs.volatility))
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes price and Greeks for both the call and the put
pub fn price(inputs: &PricingInputs) -> OptionResult<PricingResult> {
    inputs.validate()?;

    let spot = inputs.spot;
    let strike = inputs.strike;

    if inputs.is_degenerate() {
        return Ok(PricingResult {
            call_price: OptionType::Call.intrinsic(spot, strike),
            put_price: OptionType::Put.intrinsic(spot, strike),
            call_delta: if spot > strike { 1.0 } else { 0.0 },
            put_delta: if spot < strike { -1.0 } else { 0.0 },
            call_theta: 0.0,
            put_theta: 0.0,
            vega: 0.0,
            gamma: 0.0,
        });
    }

    let rate = inputs.risk_free_rate;
    let vol = inputs.volatility;
    let time = inputs.years();
    let sqrt_t = time.sqrt();
    let (d1, d2) = d1_d2(inputs);
    let df = (-rate * time).exp();
    let pdf_d1 = norm_pdf(d1);

    let call_price = spot * norm_cdf(d1) - strike * df * norm_cdf(d2);
    let put_price = strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1);

    let call_delta = norm_cdf(d1);
    let put_delta = call_delta - 1.0;

    // Theta (per day)
    let term1 = -spot * pdf_d1 * vol / (2.0 * sqrt_t);
    let call_theta = (term1 - rate * strike * df * norm_cdf(d2)) / DAYS_PER_YEAR;
    let put_theta = (term1 + rate * strike * df * norm_cdf(-d2)) / DAYS_PER_YEAR;

    Ok(PricingResult {
        call_price,
        put_price,
        call_delta,
        put_delta,
        call_theta,
        put_theta,
        vega: spot * pdf_d1 * sqrt_t / 100.0,
        gamma: pdf_d1 / (spot * vol * sqrt_t),
    })
}

/// Price of a single option type
pub fn option_price(inputs: &PricingInputs, option_type: OptionType) -> OptionResult<f64> {
    Ok(price(inputs)?.price(option_type))
}

/// Enrich every quote of a chain with price and Greeks at the chain's spot
pub fn enrich_chain(chain: &QuoteChain, risk_free_rate: f64) -> OptionResult<Vec<EnrichedQuote>> {
    enrich_chain_at(chain, chain.spot, risk_free_rate)
}

/// Enrich every quote of a chain at an arbitrary spot.
///
/// Each quote is priced with its own implied vol and its own expiry.
pub fn enrich_chain_at(
    chain: &QuoteChain,
    spot: f64,
    risk_free_rate: f64,
) -> OptionResult<Vec<EnrichedQuote>> {
    chain
        .quotes
        .iter()
        .map(|quote| {
            let days = days_to_expiry(quote.expiry, chain.trade_date)?;
            let inputs = PricingInputs::new(spot, quote.strike, days, quote.implied_vol, risk_free_rate);
            let greeks = price(&inputs)?.position(quote.option_type);

            Ok(EnrichedQuote {
                quote: quote.clone(),
                days_to_expiry: days,
                price: greeks.price,
                delta: greeks.delta,
                theta: greeks.theta,
                vega: greeks.vega,
                gamma: greeks.gamma,
            })
        })
        .collect()
}
