//! Common test utilities and fixtures

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use survivor_backtest::{SurvivorConfig, Tick};

/// Fixed session start shared by all fixtures
pub fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap()
}

/// Build a feed of one tick per minute from the given prices
pub fn tick_feed(prices: &[Decimal]) -> Vec<Tick> {
    let start = session_start();
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| Tick::new(start + Duration::minutes(i as i64), price))
        .collect()
}

/// The reference NIFTY parameter set used across the suite
pub fn sample_config() -> SurvivorConfig {
    SurvivorConfig::nifty_defaults()
}
