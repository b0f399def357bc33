//! Dealer Gamma Exposure (GEX)
//!
//! Derives a dollar gamma-exposure profile from an option chain's open
//! interest:
//! - **Per-strike GEX** at the observed spot. Call exposure is positive,
//!   put exposure is negated (dealers assumed long calls, short puts).
//! - **Spot sweep**: every contract re-priced over a geometric grid of
//!   hypothetical spots with its observed implied vol held fixed.
//! - **Zero-gamma level**: first sign change of swept net GEX, located by
//!   linear interpolation.

mod config;
mod crossing;
mod engine;
mod gex;
mod sweep;

pub use config::*;
pub use crossing::*;
pub use engine::*;
pub use gex::*;
pub use sweep::*;

use serde::{Deserialize, Serialize};

/// Gamma exposure at one strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaExposureRow {
    pub strike: f64,
    /// Call gamma x call OI x multiplier x spot / 100
    pub call_gex: f64,
    /// Negated put gamma x put OI x multiplier x spot / 100
    pub put_gex: f64,
    pub net_gex: f64,
}

/// Aggregate exposure across strikes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GexTotals {
    pub call_gex: f64,
    pub put_gex: f64,
    pub net_gex: f64,
}

impl GexTotals {
    /// Sum a set of rows
    pub fn from_rows(rows: &[GammaExposureRow]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            call_gex: acc.call_gex + row.call_gex,
            put_gex: acc.put_gex + row.put_gex,
            net_gex: acc.net_gex + row.net_gex,
        })
    }
}

/// One strike of a chain re-priced at some spot: both sides' model outputs
/// alongside their open interest. A side missing from the chain carries
/// zero open interest and zero Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RepricedStrike {
    pub strike: f64,
    pub call_iv: f64,
    pub put_iv: f64,
    pub call_oi: u64,
    pub put_oi: u64,
    pub call_price: f64,
    pub put_price: f64,
    pub call_delta: f64,
    pub put_delta: f64,
    pub call_gamma: f64,
    pub put_gamma: f64,
}
