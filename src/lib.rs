//! # bsoption - European Option Analytics
//!
//! Closed-form Black-Scholes analytics for European-style vanilla options,
//! consuming option-chain quotes supplied by an external market-data layer.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: Price, delta, theta, vega and gamma for a call/put pair
//! - **Implied Volatility**: Bracketed bisection on the model price
//! - **Gamma Exposure**: Per-strike dealer GEX, spot sweep, zero-gamma level
//! - **Strategies**: Ratio-weighted multi-leg combos and payoff curves
//!
//! ## Usage
//!
//! ```rust
//! use bsoption::prelude::*;
//!
//! let inputs = PricingInputs::new(100.0, 100.0, 30.0, 0.20, 0.0);
//! let result = bs_price(&inputs).unwrap();
//! assert!((result.call_price - result.put_price).abs() < 1e-9);
//!
//! let iv = implied_volatility(
//!     result.call_price, 100.0, 100.0, 30.0, OptionType::Call, 0.0,
//!     &IvSolverConfig::default(),
//! ).unwrap();
//! assert!((iv.volatility - 0.20).abs() < 0.001);
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Fetch or store market data
//! - Price American early exercise
//! - Fit a volatility surface
//! - Render charts (curves are returned as data)

pub mod config;
pub mod core;
pub mod exposure;
pub mod models;
pub mod strategy;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        days_to_expiry, Direction, EnrichedQuote, OptionError, OptionQuote, OptionResult,
        OptionType, PositionGreeks, PricingResult, QuoteChain,
    };

    // Models
    pub use crate::models::{
        enrich_chain, enrich_chain_at, implied_volatility, norm_cdf, norm_pdf, option_price,
        price as bs_price, solve_quote_iv, Convergence, ImpliedVol, IvSolverConfig, PricingInputs,
    };

    // Gamma exposure
    pub use crate::exposure::{
        find_zero_crossing, gex_rows, spot_levels, GammaExposureRow, GammaProfile, GexConfig,
        GexEngine, GexSnapshot, GexSweep, GexTotals, RepricedStrike,
    };

    // Strategies
    pub use crate::strategy::{
        combine, option_payoff, PayoffConfig, PayoffCurve, PayoffDiagram, PayoffPoint,
        RatioRegistry, StrategyCombo, StrategyComposer, StrategyLeg,
    };

    pub use crate::config::AnalyticsConfig;
}

// Re-export main types at crate root
pub use crate::core::{OptionError, OptionResult};
pub use crate::exposure::GexEngine;
pub use crate::strategy::StrategyComposer;
