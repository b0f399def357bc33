//! Multi-leg option strategies
//!
//! Legs are priced independently and combined as a ratio-weighted sum,
//! signed by the strategy's direction. Ratios come from named templates
//! held in a `RatioRegistry`:
//! - `spread` (1, -1): debit/credit spread, long one leg and short the other
//! - `strangle` (1, 1): strangle/straddle, same side on both legs
//! - `synthetic` (1, -1): long call + short put, or the reverse
//!
//! New templates (e.g. `ratio_2:1`) can be registered at runtime.

mod combo;
mod composer;
mod payoff;
mod registry;

pub use combo::*;
pub use composer::*;
pub use payoff::*;
pub use registry::*;
