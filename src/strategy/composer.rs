//! StrategyComposer - builds combos from templates and evaluates them

use std::sync::Arc;

use chrono::NaiveDate;

use super::{legs_payoff, PayoffConfig, PayoffDiagram, RatioRegistry, StrategyCombo, StrategyLeg};
use crate::core::{Direction, OptionError, OptionResult, PositionGreeks};

/// Combines priced legs into strategies using a shared template registry
pub struct StrategyComposer {
    registry: Arc<RatioRegistry>,
    risk_free_rate: f64,
    payoff: PayoffConfig,
}

impl StrategyComposer {
    /// Composer with the default templates, zero rate and default payoff grid
    pub fn new() -> Self {
        Self::with_registry(Arc::new(RatioRegistry::with_defaults()))
    }

    /// Composer sharing an existing registry
    pub fn with_registry(registry: Arc<RatioRegistry>) -> Self {
        Self {
            registry,
            risk_free_rate: 0.0,
            payoff: PayoffConfig::default(),
        }
    }

    pub fn with_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn with_payoff_config(mut self, payoff: PayoffConfig) -> Self {
        self.payoff = payoff;
        self
    }

    pub fn registry(&self) -> &RatioRegistry {
        &self.registry
    }

    pub fn payoff_config(&self) -> &PayoffConfig {
        &self.payoff
    }

    /// Build a combo from a named template. The template's ratios are
    /// assigned to `legs` in order, replacing whatever ratio they carried.
    pub fn combo(
        &self,
        template: &str,
        legs: Vec<StrategyLeg>,
        direction: Direction,
    ) -> OptionResult<StrategyCombo> {
        let ratios = self.registry.get(template)?;
        if ratios.len() != legs.len() {
            return Err(OptionError::invalid_input(format!(
                "template {template} has {} ratios but {} legs were given",
                ratios.len(),
                legs.len()
            )));
        }

        let legs = legs
            .into_iter()
            .zip(ratios)
            .map(|(leg, ratio)| leg.with_ratio(ratio))
            .collect();
        StrategyCombo::new(template, legs, direction)
    }

    /// Combined price and Greeks on `trade_date`
    pub fn evaluate(
        &self,
        combo: &StrategyCombo,
        spot: f64,
        trade_date: NaiveDate,
    ) -> OptionResult<PositionGreeks> {
        combo.evaluate(spot, trade_date, self.risk_free_rate)
    }

    /// Payoff diagram with the composer's payoff settings
    pub fn payoff(&self, combo: &StrategyCombo) -> OptionResult<PayoffDiagram> {
        legs_payoff(
            combo.label(),
            &combo.legs,
            combo.direction,
            self.risk_free_rate,
            &self.payoff,
        )
    }
}

impl Default for StrategyComposer {
    fn default() -> Self {
        Self::new()
    }
}
