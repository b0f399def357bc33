//! Model outputs
//!
//! `PricingResult` carries both sides of one strike/expiry/vol combination.
//! `PositionGreeks` is the single-instrument view used when legs are
//! combined into a strategy.

use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// Black-Scholes price and Greeks for a call and a put sharing the same inputs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_price: f64,
    pub put_price: f64,
    /// Delta: dV/dS, in [0, 1]
    pub call_delta: f64,
    /// Delta: dV/dS, in [-1, 0]
    pub put_delta: f64,
    /// Theta per calendar day
    pub call_theta: f64,
    pub put_theta: f64,
    /// Vega per 1 vol point (1%), same for call and put
    pub vega: f64,
    /// Gamma: d²V/dS², same for call and put
    pub gamma: f64,
}

impl PricingResult {
    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }

    pub fn delta(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_delta,
            OptionType::Put => self.put_delta,
        }
    }

    pub fn theta(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_theta,
            OptionType::Put => self.put_theta,
        }
    }

    /// Collapse to the view of a single option type
    pub fn position(&self, option_type: OptionType) -> PositionGreeks {
        PositionGreeks {
            price: self.price(option_type),
            delta: self.delta(option_type),
            theta: self.theta(option_type),
            vega: self.vega,
            gamma: self.gamma,
        }
    }
}

/// Price and Greeks of one instrument (an option leg or a whole strategy)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionGreeks {
    pub price: f64,
    pub delta: f64,
    pub theta: f64,
    pub vega: f64,
    pub gamma: f64,
}

impl PositionGreeks {
    pub fn new(price: f64, delta: f64, theta: f64, vega: f64, gamma: f64) -> Self {
        Self {
            price,
            delta,
            theta,
            vega,
            gamma,
        }
    }

    /// Scale every field by a factor (e.g., a leg ratio or a direction sign)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            price: self.price * factor,
            delta: self.delta * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            gamma: self.gamma * factor,
        }
    }

    /// Add two positions
    pub fn add(&self, other: &PositionGreeks) -> Self {
        Self {
            price: self.price + other.price,
            delta: self.delta + other.delta,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            gamma: self.gamma + other.gamma,
        }
    }
}
