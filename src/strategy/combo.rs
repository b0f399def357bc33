//! Strategy legs and combinations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{
    days_to_expiry, ensure_finite, Direction, OptionError, OptionResult, OptionType, PositionGreeks,
};
use crate::models::{price, PricingInputs};

/// One option position within a strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyLeg {
    pub option_type: OptionType,
    pub strike: f64,
    pub expiry: NaiveDate,
    /// Volatility as a fraction (50% = 0.5)
    pub volatility: f64,
    /// Signed number of units held
    pub ratio: i32,
}

impl StrategyLeg {
    /// A leg with ratio 1
    pub fn new(option_type: OptionType, strike: f64, expiry: NaiveDate, volatility: f64) -> Self {
        Self {
            option_type,
            strike,
            expiry,
            volatility,
            ratio: 1,
        }
    }

    pub fn with_ratio(mut self, ratio: i32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn validate(&self) -> OptionResult<()> {
        if ensure_finite("strike", self.strike)? <= 0.0 {
            return Err(OptionError::invalid_input(format!(
                "leg strike must be positive, got {}",
                self.strike
            )));
        }
        if ensure_finite("volatility", self.volatility)? < 0.0 {
            return Err(OptionError::invalid_input(format!(
                "leg volatility must be non-negative, got {}",
                self.volatility
            )));
        }
        Ok(())
    }

    /// Price and Greeks of one unit of this leg (ratio not applied)
    pub fn value(&self, spot: f64, trade_date: NaiveDate, rate: f64) -> OptionResult<PositionGreeks> {
        let days = days_to_expiry(self.expiry, trade_date)?;
        let inputs = PricingInputs::new(spot, self.strike, days, self.volatility, rate);
        Ok(price(&inputs)?.position(self.option_type))
    }
}

/// Ratio-weighted sum of leg values, signed by direction
pub fn combine<I>(values: I, direction: Direction) -> PositionGreeks
where
    I: IntoIterator<Item = (PositionGreeks, i32)>,
{
    values
        .into_iter()
        .fold(PositionGreeks::default(), |acc, (value, ratio)| {
            acc.add(&value.scale(ratio as f64))
        })
        .scale(direction.sign())
}

/// An ordered set of legs traded as one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCombo {
    /// Template the ratios came from
    pub template: String,
    pub legs: Vec<StrategyLeg>,
    pub direction: Direction,
}

impl StrategyCombo {
    pub fn new(
        template: impl Into<String>,
        legs: Vec<StrategyLeg>,
        direction: Direction,
    ) -> OptionResult<Self> {
        if legs.len() < 2 {
            return Err(OptionError::invalid_input(format!(
                "a strategy needs at least two legs, got {}",
                legs.len()
            )));
        }
        for leg in &legs {
            leg.validate()?;
        }
        Ok(Self {
            template: template.into(),
            legs,
            direction,
        })
    }

    /// Combined price and Greeks. Each leg's days to expiry is measured
    /// from `trade_date` independently, so legs may expire on different dates.
    pub fn evaluate(&self, spot: f64, trade_date: NaiveDate, rate: f64) -> OptionResult<PositionGreeks> {
        let values = self
            .legs
            .iter()
            .map(|leg| Ok((leg.value(spot, trade_date, rate)?, leg.ratio)))
            .collect::<OptionResult<Vec<_>>>()?;
        Ok(combine(values, self.direction))
    }

    /// Short label, e.g. `LONG-spread-100C-110C`
    pub fn label(&self) -> String {
        let legs: Vec<String> = self
            .legs
            .iter()
            .map(|l| format!("{}{}", l.strike, l.option_type.code()))
            .collect();
        format!("{}-{}-{}", self.direction, self.template, legs.join("-"))
    }
}
