//! Simulation driver
//!
//! Iterates the price feed, feeds each tick to the strategy, marks the
//! broker's portfolio to market, and records the equity curve. Strictly
//! sequential: tick N is fully resolved before tick N+1 begins.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::broker::SimBroker;
use crate::common::errors::BacktestError;
use crate::common::types::{EquityPoint, History, Tick};
use crate::strategy::Strategy;

/// Everything one simulation run produced
#[derive(Debug)]
pub struct BacktestRun {
    /// Portfolio value per processed tick, in feed order
    pub history: History,
    /// Recoverable per-tick errors, recorded instead of aborting the run
    pub tick_errors: Vec<(DateTime<Utc>, BacktestError)>,
}

impl BacktestRun {
    /// Whether the feed produced any history at all
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Run a strategy over a price feed against a simulated broker
///
/// For each tick: (1) the strategy reacts and may place orders, (2) the
/// broker marks the portfolio at the tick price, (3) an [`EquityPoint`] is
/// appended. A recoverable strategy error drops only that tick's decision;
/// the tick is still marked and recorded. Ticks that violate the
/// strictly-increasing-timestamp contract are skipped and recorded.
///
/// An empty feed yields an empty history; reporting decides what that means.
pub fn run_backtest(
    feed: impl IntoIterator<Item = Tick>,
    strategy: &mut dyn Strategy,
    broker: &mut SimBroker,
) -> BacktestRun {
    let mut history: History = Vec::new();
    let mut tick_errors: Vec<(DateTime<Utc>, BacktestError)> = Vec::new();
    let mut last_timestamp: Option<DateTime<Utc>> = None;

    for tick in feed {
        if let Some(last) = last_timestamp {
            if tick.timestamp <= last {
                warn!(
                    timestamp = %tick.timestamp,
                    "skipping tick: timestamp does not strictly increase"
                );
                tick_errors.push((
                    tick.timestamp,
                    BacktestError::InvalidTick(format!(
                        "timestamp {} does not strictly increase past {}",
                        tick.timestamp, last
                    )),
                ));
                continue;
            }
        }
        last_timestamp = Some(tick.timestamp);

        if let Err(e) = strategy.on_tick(&tick, broker) {
            warn!(timestamp = %tick.timestamp, error = %e, "tick decision aborted");
            tick_errors.push((tick.timestamp, e));
        }

        let portfolio_value = broker.mark_to_market(tick.price);
        debug!(timestamp = %tick.timestamp, %portfolio_value, "marked to market");

        history.push(EquityPoint {
            timestamp: tick.timestamp,
            portfolio_value,
        });
    }

    strategy.on_finish(last_timestamp);

    BacktestRun {
        history,
        tick_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::ExecutionVenue;
    use crate::common::errors::Result;
    use crate::common::types::{OrderIntent, Side};
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Strategy that does nothing, for driver-level tests
    struct IdleStrategy;

    impl Strategy for IdleStrategy {
        fn name(&self) -> &str {
            "idle"
        }

        fn on_tick(&mut self, _tick: &Tick, _venue: &mut dyn ExecutionVenue) -> Result<()> {
            Ok(())
        }
    }

    /// Strategy that sells once on the first tick
    struct SellOnceStrategy {
        done: bool,
    }

    impl Strategy for SellOnceStrategy {
        fn name(&self) -> &str {
            "sell_once"
        }

        fn on_tick(&mut self, tick: &Tick, venue: &mut dyn ExecutionVenue) -> Result<()> {
            if !self.done {
                self.done = true;
                let intent = OrderIntent::new("NIFTY-CE-24525", 50, Side::Sell, dec!(20));
                venue.place_order(&intent, tick.timestamp)?;
            }
            Ok(())
        }
    }

    fn ticks(prices: &[Decimal]) -> Vec<Tick> {
        let start = Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Tick::new(start + Duration::minutes(i as i64), price))
            .collect()
    }

    #[test]
    fn test_history_length_matches_feed_order() {
        let feed = ticks(&[dec!(24500), dec!(24510), dec!(24490), dec!(24505)]);
        let expected: Vec<_> = feed.iter().map(|t| t.timestamp).collect();

        let mut broker = SimBroker::new(dec!(100000));
        let mut strategy = IdleStrategy;
        let run = run_backtest(feed, &mut strategy, &mut broker);

        assert_eq!(run.history.len(), 4);
        let recorded: Vec<_> = run.history.iter().map(|p| p.timestamp).collect();
        assert_eq!(recorded, expected);
        assert!(run.tick_errors.is_empty());
    }

    #[test]
    fn test_empty_feed_yields_empty_history() {
        let mut broker = SimBroker::new(dec!(100000));
        let mut strategy = IdleStrategy;
        let run = run_backtest(Vec::new(), &mut strategy, &mut broker);

        assert!(run.is_empty());
        assert!(run.tick_errors.is_empty());
    }

    #[test]
    fn test_idle_strategy_history_is_flat() {
        let feed = ticks(&[dec!(24500), dec!(24501), dec!(24502)]);
        let mut broker = SimBroker::new(dec!(100000));
        let mut strategy = IdleStrategy;
        let run = run_backtest(feed, &mut strategy, &mut broker);

        assert!(run
            .history
            .iter()
            .all(|p| p.portfolio_value == dec!(100000)));
    }

    #[test]
    fn test_invariant_holds_after_every_mark() {
        let feed = ticks(&[dec!(24500), dec!(24510)]);
        let mut broker = SimBroker::new(dec!(100000));
        let mut strategy = SellOnceStrategy { done: false };
        let run = run_backtest(feed, &mut strategy, &mut broker);

        // cash 101000, one short of 50 marked at each tick price
        assert_eq!(
            run.history[0].portfolio_value,
            dec!(101000) + dec!(-50) * dec!(24500)
        );
        assert_eq!(
            run.history[1].portfolio_value,
            dec!(101000) + dec!(-50) * dec!(24510)
        );
    }

    #[test]
    fn test_non_increasing_timestamps_skipped_and_recorded() {
        let start = Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap();
        let feed = vec![
            Tick::new(start, dec!(24500)),
            Tick::new(start, dec!(24510)), // duplicate timestamp
            Tick::new(start + Duration::minutes(1), dec!(24520)),
        ];

        let mut broker = SimBroker::new(dec!(100000));
        let mut strategy = IdleStrategy;
        let run = run_backtest(feed, &mut strategy, &mut broker);

        assert_eq!(run.history.len(), 2);
        assert_eq!(run.tick_errors.len(), 1);
        assert!(matches!(
            run.tick_errors[0].1,
            BacktestError::InvalidTick(_)
        ));
    }
}
