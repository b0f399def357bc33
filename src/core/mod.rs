//! Core data types for option analytics
//!
//! Defines fundamental types:
//! - OptionType / Direction: Call/put and long/short, parsed strictly
//! - OptionQuote / QuoteChain: Externally sourced market quotes
//! - PricingResult / PositionGreeks: Model outputs
//! - OptionError: Error taxonomy shared by every module

pub mod option;
pub mod quote;
pub mod greeks;
pub mod error;

pub use option::*;
pub use quote::*;
pub use greeks::*;
pub use error::*;
