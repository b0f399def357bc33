//! bsoption CLI
//!
//! Demonstrates pricing, implied volatility, gamma exposure and strategy
//! analytics on a synthetic chain. Pass a JSON `AnalyticsConfig` path as
//! the first argument to override the defaults.

use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use bsoption::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_config() -> Result<AnalyticsConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            tracing::info!("Loaded config from {}", path);
            Ok(AnalyticsConfig::from_json_str(&json)?)
        }
        None => Ok(AnalyticsConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let rate = config.risk_free_rate;

    println!("bsoption Analytics");
    println!("==================\n");

    let spot = 100.0;
    let strike = 100.0;
    let days = 30.0;
    let vol = 0.20;

    println!("Black-Scholes Pricing Example:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Time: {:.0} days", days);
    println!("  Rate: {:.1}%", rate * 100.0);
    println!("  Vol: {:.1}%\n", vol * 100.0);

    let result = bs_price(&PricingInputs::new(spot, strike, days, vol, rate))?;
    println!("Option Prices:");
    println!("  Call: ${:.4}", result.call_price);
    println!("  Put: ${:.4}", result.put_price);
    println!("\nGreeks:");
    println!("  Delta (C/P): {:.4} / {:.4}", result.call_delta, result.put_delta);
    println!("  Theta (C/P): {:.4} / {:.4}", result.call_theta, result.put_theta);
    println!("  Vega: {:.4}", result.vega);
    println!("  Gamma: {:.6}", result.gamma);

    println!("\nImplied Volatility Solver:");
    let iv = implied_volatility(result.call_price, spot, strike, days, OptionType::Call, rate, &config.iv)?;
    println!(
        "  Recovered IV: {:.2}% (expected: {:.2}%) after {} steps, {:?}",
        iv.volatility_pct,
        vol * 100.0,
        iv.iterations,
        iv.convergence
    );

    // Synthetic chain: put open interest below spot, call open interest above
    let trade_date = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("bad trade date")?;
    let expiry = NaiveDate::from_ymd_opt(2024, 3, 28).ok_or("bad expiry")?;
    let mut chain = QuoteChain::new("DEMO", spot, expiry, trade_date);
    for (k, call_oi, put_oi) in [
        (90.0, 200, 4000),
        (95.0, 800, 3500),
        (100.0, 2500, 2500),
        (105.0, 3000, 600),
        (110.0, 3500, 150),
    ] {
        let skew = 0.20 + (100.0 - k) * 0.004;
        chain.add_pair(k, skew, call_oi, skew, put_oi)?;
    }

    println!("\n--- Gamma Exposure ---");
    let engine = GexEngine::with_config(config.gex_config());
    let profile = engine.profile(&chain)?;
    println!("{:>8} {:>14} {:>14} {:>14}", "Strike", "Call GEX", "Put GEX", "Net GEX");
    for row in &profile.observed.rows {
        println!(
            "{:>8.1} {:>14.2} {:>14.2} {:>14.2}",
            row.strike, row.call_gex, row.put_gex, row.net_gex
        );
    }
    let totals = profile.observed.totals;
    println!(
        "  Totals: call {:.2}, put {:.2}, net {:.2}",
        totals.call_gex, totals.put_gex, totals.net_gex
    );
    println!("\n{:>10} {:>14} {:>14} {:>14}", "Spot", "Call GEX", "Put GEX", "Net GEX");
    let calls = profile.sweep.call_curve();
    let puts = profile.sweep.put_curve();
    for ((spot, call), ((_, put), (_, net))) in calls
        .iter()
        .zip(puts.iter().zip(profile.sweep.net_curve().iter()))
    {
        println!("{:>10.2} {:>14.2} {:>14.2} {:>14.2}", spot, call, put, net);
    }
    match profile.zero_gamma {
        Some(level) => println!("  Zero-gamma level: {:.2}", level),
        None => println!("  No zero-gamma level within the sweep"),
    }

    println!("\n--- Strategy ---");
    let composer = StrategyComposer::new()
        .with_rate(rate)
        .with_payoff_config(config.payoff.clone());
    let combo = composer.combo(
        "spread",
        vec![
            StrategyLeg::new(OptionType::Call, 100.0, expiry, 0.20),
            StrategyLeg::new(OptionType::Call, 110.0, expiry, 0.16),
        ],
        Direction::Long,
    )?;
    let value = composer.evaluate(&combo, spot, trade_date)?;
    println!("  {}", combo.label());
    println!(
        "  Price {:.4}, delta {:.4}, theta {:.4}, vega {:.4}, gamma {:.6}",
        value.price, value.delta, value.theta, value.vega, value.gamma
    );

    let diagram = composer.payoff(&combo)?;
    for target in [90.0, 100.0, 105.0, 110.0, 120.0] {
        if let Some(point) = diagram.at_expiry.nearest(target) {
            println!("  At expiry S={:.2}: {:.2}", point.spot, point.payoff);
        }
    }

    println!("\n--- JSON ---");
    println!("{}", serde_json::to_string_pretty(&profile.observed)?);
    println!("{}", serde_json::to_string_pretty(&value)?);

    println!("\n--- Done ---");
    Ok(())
}
