//! Pricing Models
//!
//! Implements:
//! - Black-Scholes (closed-form price and Greeks, chain enrichment)
//! - Implied volatility by bisection on the Black-Scholes price

pub mod black_scholes;
pub mod implied_vol;

pub use black_scholes::*;
pub use implied_vol::*;
