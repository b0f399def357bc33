//! Scenario tests across pricing, exposure and strategy modules

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;

use bsoption::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn chain_with(oi: &[(f64, u64, u64)]) -> QuoteChain {
    let mut chain = QuoteChain::new("TEST", 100.0, date(2024, 4, 19), date(2024, 3, 20));
    for &(strike, call_oi, put_oi) in oi {
        chain.add_pair(strike, 0.25, call_oi, 0.25, put_oi).unwrap();
    }
    chain
}

#[test]
fn atm_zero_rate_pricing() {
    let r = bs_price(&PricingInputs::new(100.0, 100.0, 30.0, 0.20, 0.0)).unwrap();

    assert_abs_diff_eq!(r.call_price, r.put_price, epsilon = 1e-9);
    assert_abs_diff_eq!(r.call_delta, 0.5, epsilon = 0.03);
}

#[test]
fn expiry_boundary_pricing() {
    let r = bs_price(&PricingInputs::new(105.0, 100.0, 0.0, 0.35, 0.0)).unwrap();

    assert_eq!(r.call_price, 5.0);
    assert_eq!(r.put_price, 0.0);
}

#[test]
fn all_put_chain_is_short_gamma() {
    let chain = chain_with(&[(90.0, 0, 1000), (100.0, 0, 2000), (110.0, 0, 500)]);
    let engine = GexEngine::new();

    let snapshot = engine.exposure(&chain).unwrap();
    assert!(snapshot.rows.iter().all(|r| r.net_gex <= 0.0));

    let sweep = engine.sweep(&chain).unwrap();
    assert!(sweep.levels.iter().flat_map(|l| &l.rows).all(|r| r.net_gex <= 0.0));
    assert_eq!(find_zero_crossing(&sweep.net_curve()), None);
}

#[test]
fn all_call_chain_is_long_gamma() {
    let chain = chain_with(&[(90.0, 1000, 0), (100.0, 2000, 0), (110.0, 500, 0)]);
    let snapshot = GexEngine::new().exposure(&chain).unwrap();

    assert!(snapshot.rows.iter().all(|r| r.net_gex >= 0.0));
    assert!(snapshot.totals.net_gex > 0.0);
    assert_eq!(snapshot.totals.put_gex, 0.0);
}

#[test]
fn zero_crossing_interpolation() {
    let level = find_zero_crossing(&[(100.0, 5.0), (105.0, -3.0)]).unwrap();
    assert_abs_diff_eq!(level, 103.125, epsilon = 1e-12);
}

#[test]
fn zero_gamma_between_put_and_call_walls() {
    let chain = chain_with(&[(92.0, 0, 6000), (96.0, 200, 3000), (104.0, 3000, 200), (108.0, 6000, 0)]);
    let profile = GexEngine::new().profile(&chain).unwrap();

    let level = profile.zero_gamma.unwrap();
    assert!(level > 92.0 && level < 108.0, "zero gamma at {level}");
}

#[test]
fn sweep_holds_implied_vol_fixed() {
    let chain = chain_with(&[(100.0, 1000, 1000)]);
    let sweep = GexEngine::new().sweep(&chain).unwrap();

    for level in &sweep.levels {
        assert_eq!(level.repriced[0].call_iv, 0.25);
        assert_eq!(level.repriced[0].put_iv, 0.25);
    }
}

#[test]
fn spread_combo_price() {
    let call_100 = PositionGreeks::new(5.00, 0.55, -0.05, 0.12, 0.04);
    let call_110 = PositionGreeks::new(2.00, 0.30, -0.04, 0.10, 0.03);
    let registry = RatioRegistry::with_defaults();
    let ratios = registry.get("spread").unwrap();

    let combo = combine([(call_100, ratios[0]), (call_110, ratios[1])], Direction::Long);
    assert_abs_diff_eq!(combo.price, 3.00, epsilon = 1e-12);
}

#[test]
fn priced_spread_matches_leg_difference() {
    let composer = StrategyComposer::new();
    let expiry = date(2024, 4, 19);
    let trade = date(2024, 3, 20);
    let combo = composer
        .combo(
            "spread",
            vec![
                StrategyLeg::new(OptionType::Call, 100.0, expiry, 0.25),
                StrategyLeg::new(OptionType::Call, 110.0, expiry, 0.25),
            ],
            Direction::Long,
        )
        .unwrap();

    let value = composer.evaluate(&combo, 100.0, trade).unwrap();
    let chain = chain_with(&[(100.0, 1, 1), (110.0, 1, 1)]);
    let enriched = enrich_chain(&chain, 0.0).unwrap();
    let call_100 = enriched.iter().find(|q| q.quote.strike == 100.0 && q.quote.option_type == OptionType::Call).unwrap();
    let call_110 = enriched.iter().find(|q| q.quote.strike == 110.0 && q.quote.option_type == OptionType::Call).unwrap();

    assert_abs_diff_eq!(value.price, call_100.price - call_110.price, epsilon = 1e-12);
    assert_abs_diff_eq!(value.gamma, call_100.gamma - call_110.gamma, epsilon = 1e-12);
}

#[test]
fn invalid_option_type_rejected_at_boundary() {
    let json = r#"{
        "underlying": "TEST", "option_type": "Future", "strike": 100.0,
        "expiry": "2024-04-19", "implied_vol": 0.2, "open_interest": 10,
        "bid": null, "ask": null
    }"#;
    assert!(serde_json::from_str::<OptionQuote>(json).is_err());
    assert!(matches!("F".parse::<OptionType>(), Err(OptionError::InvalidOptionType(_))));
}
