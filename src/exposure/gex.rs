//! Per-strike gamma exposure

use super::{GammaExposureRow, RepricedStrike};
use crate::core::{OptionError, OptionQuote, OptionResult, OptionType, QuoteChain};
use crate::models::{price, PricingInputs};

/// Gamma exposure of one strike at `spot`
pub fn gex_row(strike: &RepricedStrike, spot: f64, multiplier: f64) -> GammaExposureRow {
    let scale = multiplier * spot / 100.0;
    let call_gex = strike.call_gamma * strike.call_oi as f64 * scale;
    let put_gex = -strike.put_gamma * strike.put_oi as f64 * scale;

    GammaExposureRow {
        strike: strike.strike,
        call_gex,
        put_gex,
        net_gex: call_gex + put_gex,
    }
}

/// Gamma exposure of every strike at `spot`, from already-computed gammas
pub fn gex_rows(strikes: &[RepricedStrike], spot: f64, multiplier: f64) -> Vec<GammaExposureRow> {
    strikes.iter().map(|s| gex_row(s, spot, multiplier)).collect()
}

/// Pair calls and puts by strike and re-price both sides at `spot`.
///
/// Each contract keeps its own implied vol; `days` is shared by the chain.
/// Two quotes of the same type at one strike are rejected.
pub fn reprice_chain(
    chain: &QuoteChain,
    spot: f64,
    days: f64,
    rate: f64,
) -> OptionResult<Vec<RepricedStrike>> {
    let mut out: Vec<(RepricedStrike, [bool; 2])> = Vec::new();

    let mut quotes: Vec<&OptionQuote> = chain.quotes.iter().collect();
    quotes.sort_by(|a, b| a.strike.total_cmp(&b.strike));

    for quote in quotes {
        let same_strike = matches!(
            out.last(),
            Some((row, _)) if (row.strike - quote.strike).abs() <= 1e-9
        );
        if !same_strike {
            let row = RepricedStrike {
                strike: quote.strike,
                ..Default::default()
            };
            out.push((row, [false; 2]));
        }
        if let Some((row, seen)) = out.last_mut() {
            fill_side(row, seen, quote, spot, days, rate)?;
        }
    }

    Ok(out.into_iter().map(|(row, _)| row).collect())
}

fn fill_side(
    row: &mut RepricedStrike,
    seen: &mut [bool; 2],
    quote: &OptionQuote,
    spot: f64,
    days: f64,
    rate: f64,
) -> OptionResult<()> {
    let slot = match quote.option_type {
        OptionType::Call => &mut seen[0],
        OptionType::Put => &mut seen[1],
    };
    if *slot {
        return Err(OptionError::invalid_input(format!(
            "duplicate {} quote at strike {}",
            quote.option_type, quote.strike
        )));
    }
    *slot = true;

    let result = price(&PricingInputs::new(spot, quote.strike, days, quote.implied_vol, rate))?;
    match quote.option_type {
        OptionType::Call => {
            row.call_iv = quote.implied_vol;
            row.call_oi = quote.open_interest;
            row.call_price = result.call_price;
            row.call_delta = result.call_delta;
            row.call_gamma = result.gamma;
        }
        OptionType::Put => {
            row.put_iv = quote.implied_vol;
            row.put_oi = quote.open_interest;
            row.put_price = result.put_price;
            row.put_delta = result.put_delta;
            row.put_gamma = result.gamma;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn chain() -> QuoteChain {
        let trade = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expiry = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let mut chain = QuoteChain::new("HSI", 100.0, expiry, trade);
        chain.add_pair(95.0, 0.25, 500, 0.28, 1500).unwrap();
        chain.add_pair(100.0, 0.22, 2000, 0.22, 1000).unwrap();
        chain
    }

    #[test]
    fn test_gex_formula() {
        let strike = RepricedStrike {
            strike: 100.0,
            call_oi: 1000,
            put_oi: 500,
            call_gamma: 0.05,
            put_gamma: 0.04,
            ..Default::default()
        };
        let row = gex_row(&strike, 200.0, 100.0);

        // 0.05 * 1000 * 100 * 200 / 100
        assert_relative_eq!(row.call_gex, 10_000.0, epsilon = 1e-9);
        assert_relative_eq!(row.put_gex, -4_000.0, epsilon = 1e-9);
        assert_relative_eq!(row.net_gex, 6_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_reprice_pairs_by_strike() {
        let rows = reprice_chain(&chain(), 100.0, 30.0, 0.0).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].strike, 95.0);
        assert_eq!(rows[0].call_oi, 500);
        assert_eq!(rows[0].put_oi, 1500);
        assert_eq!(rows[0].put_iv, 0.28);
        // Same vol on both sides at 100 -> same gamma
        assert_relative_eq!(rows[1].call_gamma, rows[1].put_gamma, epsilon = 1e-15);
        assert!(rows[1].call_delta > 0.0 && rows[1].put_delta < 0.0);
    }

    #[test]
    fn test_missing_side_contributes_nothing() {
        let mut chain = chain();
        let expiry = chain.expiry;
        chain
            .add_quote(OptionQuote::new("HSI", OptionType::Call, 110.0, expiry, 0.2, 300))
            .unwrap();

        let rows = reprice_chain(&chain, 100.0, 30.0, 0.0).unwrap();
        let row = gex_row(&rows[2], 100.0, 100.0);
        assert_eq!(rows[2].put_oi, 0);
        assert_eq!(row.put_gex, 0.0);
        assert!(row.call_gex > 0.0);
    }

    #[test]
    fn test_duplicate_contract_rejected() {
        let mut chain = chain();
        let expiry = chain.expiry;
        chain
            .add_quote(OptionQuote::new("HSI", OptionType::Put, 100.0, expiry, 0.3, 1))
            .unwrap();

        assert!(reprice_chain(&chain, 100.0, 30.0, 0.0).is_err());
    }
}
