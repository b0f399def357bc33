//! Option quote data
//!
//! Quotes arrive from an external market-data collaborator and are treated
//! as immutable. Derived values (Greeks, solved vols) produce new records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, OptionError, OptionResult};
use super::option::{days_to_expiry, OptionType};

/// Option market quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Underlying symbol
    pub underlying: String,
    /// Option type (Call/Put)
    pub option_type: OptionType,
    /// Strike price
    pub strike: f64,
    /// Expiration date
    pub expiry: NaiveDate,
    /// Implied volatility as a fraction (50% = 0.5)
    pub implied_vol: f64,
    /// Open interest in contracts
    pub open_interest: u64,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
}

impl OptionQuote {
    pub fn new(
        underlying: impl Into<String>,
        option_type: OptionType,
        strike: f64,
        expiry: NaiveDate,
        implied_vol: f64,
        open_interest: u64,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            option_type,
            strike,
            expiry,
            implied_vol,
            open_interest,
            bid: None,
            ask: None,
        }
    }

    /// Attach a bid/ask pair
    pub fn with_bid_ask(mut self, bid: f64, ask: f64) -> Self {
        self.bid = Some(bid);
        self.ask = Some(ask);
        self
    }

    /// Copy of this quote carrying a different implied volatility
    pub fn with_implied_vol(&self, implied_vol: f64) -> Self {
        Self {
            implied_vol,
            ..self.clone()
        }
    }

    /// Mid price from bid/ask, if both sides are present and not crossed
    pub fn mid(&self) -> Option<f64> {
        match (self.bid, self.ask) {
            (Some(b), Some(a)) if a >= b => Some((a + b) / 2.0),
            _ => None,
        }
    }

    /// Check strike and implied vol are in domain
    pub fn validate(&self) -> OptionResult<()> {
        let strike = ensure_finite("strike", self.strike)?;
        if strike <= 0.0 {
            return Err(OptionError::invalid_input(format!(
                "{} {} strike must be positive, got {strike}",
                self.underlying, self.option_type
            )));
        }
        let vol = ensure_finite("implied_vol", self.implied_vol)?;
        if vol < 0.0 {
            return Err(OptionError::invalid_input(format!(
                "{} {}@{} implied vol must be non-negative, got {vol}",
                self.underlying, self.option_type, self.strike
            )));
        }
        Ok(())
    }
}

/// Chain of quotes for one underlying and one expiry, observed on `trade_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Observed underlying spot
    pub spot: f64,
    /// Expiry date shared by every quote
    pub expiry: NaiveDate,
    /// Date the quotes were observed
    pub trade_date: NaiveDate,
    /// Quotes, kept sorted by strike (calls before puts at equal strike)
    pub quotes: Vec<OptionQuote>,
}

impl QuoteChain {
    pub fn new(
        underlying: impl Into<String>,
        spot: f64,
        expiry: NaiveDate,
        trade_date: NaiveDate,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            spot,
            expiry,
            trade_date,
            quotes: Vec::new(),
        }
    }

    /// Add a quote. Rejects invalid quotes and quotes for another expiry.
    pub fn add_quote(&mut self, quote: OptionQuote) -> OptionResult<()> {
        quote.validate()?;
        if quote.expiry != self.expiry {
            return Err(OptionError::invalid_input(format!(
                "quote expiry {} does not match chain expiry {}",
                quote.expiry, self.expiry
            )));
        }
        self.quotes.push(quote);
        self.quotes.sort_by(|a, b| {
            a.strike
                .total_cmp(&b.strike)
                .then_with(|| (a.option_type == OptionType::Put).cmp(&(b.option_type == OptionType::Put)))
        });
        Ok(())
    }

    /// Add a call and a put at the same strike
    pub fn add_pair(
        &mut self,
        strike: f64,
        call_vol: f64,
        call_oi: u64,
        put_vol: f64,
        put_oi: u64,
    ) -> OptionResult<()> {
        let underlying = self.underlying.clone();
        self.add_quote(OptionQuote::new(
            underlying.clone(),
            OptionType::Call,
            strike,
            self.expiry,
            call_vol,
            call_oi,
        ))?;
        self.add_quote(OptionQuote::new(
            underlying,
            OptionType::Put,
            strike,
            self.expiry,
            put_vol,
            put_oi,
        ))
    }

    /// Calendar days from trade date to expiry
    pub fn days_to_expiry(&self) -> OptionResult<f64> {
        days_to_expiry(self.expiry, self.trade_date)
    }

    /// Distinct strikes, ascending
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self.quotes.iter().map(|q| q.strike).collect();
        strikes.sort_by(|a, b| a.total_cmp(b));
        strikes.dedup();
        strikes
    }

    /// Get call quote at strike
    pub fn call_at(&self, strike: f64) -> Option<&OptionQuote> {
        self.quotes
            .iter()
            .find(|q| q.option_type == OptionType::Call && (q.strike - strike).abs() < 1e-9)
    }

    /// Get put quote at strike
    pub fn put_at(&self, strike: f64) -> Option<&OptionQuote> {
        self.quotes
            .iter()
            .find(|q| q.option_type == OptionType::Put && (q.strike - strike).abs() < 1e-9)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// A quote enriched with model price and Greeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedQuote {
    pub quote: OptionQuote,
    pub days_to_expiry: f64,
    pub price: f64,
    pub delta: f64,
    pub theta: f64,
    pub vega: f64,
    pub gamma: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    #[test]
    fn test_mid() {
        let quote = OptionQuote::new("SPY", OptionType::Call, 500.0, expiry(), 0.15, 1200)
            .with_bid_ask(10.0, 10.5);

        assert_eq!(quote.mid(), Some(10.25));

        let crossed = quote.clone().with_bid_ask(11.0, 10.0);
        assert_eq!(crossed.mid(), None);
    }

    #[test]
    fn test_with_implied_vol_leaves_original() {
        let quote = OptionQuote::new("SPY", OptionType::Put, 480.0, expiry(), 0.0, 10);
        let solved = quote.with_implied_vol(0.22);

        assert_eq!(quote.implied_vol, 0.0);
        assert_eq!(solved.implied_vol, 0.22);
        assert_eq!(solved.strike, quote.strike);
    }

    #[test]
    fn test_chain_rejects_bad_quotes() {
        let trade = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut chain = QuoteChain::new("SPY", 500.0, expiry(), trade);

        let negative_strike = OptionQuote::new("SPY", OptionType::Call, -1.0, expiry(), 0.2, 1);
        assert!(chain.add_quote(negative_strike).is_err());

        let other_expiry = OptionQuote::new("SPY", OptionType::Call, 500.0, trade, 0.2, 1);
        assert!(chain.add_quote(other_expiry).is_err());

        let negative_vol = OptionQuote::new("SPY", OptionType::Put, 500.0, expiry(), -0.1, 1);
        assert!(chain.add_quote(negative_vol).is_err());

        assert!(chain.is_empty());
    }

    #[test]
    fn test_chain_sorted_by_strike() {
        let trade = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut chain = QuoteChain::new("SPY", 500.0, expiry(), trade);
        chain.add_pair(510.0, 0.18, 100, 0.19, 50).unwrap();
        chain.add_pair(490.0, 0.20, 80, 0.22, 300).unwrap();

        assert_eq!(chain.strikes(), vec![490.0, 510.0]);
        assert_eq!(chain.quotes[0].option_type, OptionType::Call);
        assert_eq!(chain.put_at(490.0).unwrap().open_interest, 300);
        assert_eq!(chain.call_at(510.0).unwrap().implied_vol, 0.18);
        assert_eq!(chain.days_to_expiry().unwrap(), 20.0);
    }
}
