//! Option contract primitives
//!
//! Option type and position direction are closed two-variant enums. Text
//! input is parsed strictly: anything that is not a recognised spelling is
//! rejected rather than defaulted.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{OptionError, OptionResult};

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff direction: +1 for call, -1 for put
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value at given spot (the at-expiry payoff)
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Single-letter code used in chain tables
    pub fn code(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" | "c" | "Call" | "call" | "CALL" => Ok(OptionType::Call),
            "P" | "p" | "Put" | "put" | "PUT" => Ok(OptionType::Put),
            other => Err(OptionError::invalid_option_type(other)),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = OptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<char> for OptionType {
    type Error = OptionError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'C' | 'c' => Ok(OptionType::Call),
            'P' | 'p' => Ok(OptionType::Put),
            other => Err(OptionError::invalid_option_type(other.to_string())),
        }
    }
}

/// Side of a position or strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    #[default]
    Long,
    Short,
}

impl Direction {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

impl FromStr for Direction {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            _ => Err(OptionError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = OptionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Calendar days from `trade_date` to `expiry`.
///
/// An expiry before the trade date is rejected; expiry day itself is 0.
pub fn days_to_expiry(expiry: NaiveDate, trade_date: NaiveDate) -> OptionResult<f64> {
    let days = (expiry - trade_date).num_days();
    if days < 0 {
        return Err(OptionError::invalid_input(format!(
            "expiry {expiry} is before trade date {trade_date}"
        )));
    }
    Ok(days as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.phi(), 1.0);
        assert_eq!(OptionType::Put.phi(), -1.0);

        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_parse_option_type() {
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!(OptionType::try_from('P').unwrap(), OptionType::Put);

        let err = "X".parse::<OptionType>().unwrap_err();
        assert_eq!(err, OptionError::InvalidOptionType("X".into()));
        assert!(OptionType::try_from('F').is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let ok: OptionType = serde_json::from_str("\"Call\"").unwrap();
        assert_eq!(ok, OptionType::Call);
        assert!(serde_json::from_str::<OptionType>("\"Straddle\"").is_err());
    }

    #[test]
    fn test_direction() {
        assert_eq!("LONG".parse::<Direction>().unwrap(), Direction::Long);
        assert_eq!("short".parse::<Direction>().unwrap().sign(), -1.0);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(OptionError::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_days_to_expiry() {
        let trade = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 3, 28).unwrap();

        assert_eq!(days_to_expiry(expiry, trade).unwrap(), 27.0);
        assert_eq!(days_to_expiry(trade, trade).unwrap(), 0.0);
        assert!(days_to_expiry(trade, expiry).is_err());
    }
}
