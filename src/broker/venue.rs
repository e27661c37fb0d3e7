//! Execution venue and pricing capability traits

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::common::errors::Result;
use crate::common::types::OrderIntent;

/// Capability the strategy needs from its broker
///
/// The strategy is written against this trait only. A simulated venue
/// ([`SimBroker`](crate::broker::SimBroker)) and a live venue both satisfy it,
/// so the same state machine runs in backtest and production without
/// subclassing or conditional code paths.
pub trait ExecutionVenue {
    /// Execute an order intent at its stated fill price
    ///
    /// Returns a monotonically increasing order id. Malformed intents
    /// (non-positive quantity or price) fail with `InvalidOrder` and leave
    /// the venue's state untouched.
    fn place_order(&mut self, intent: &OrderIntent, timestamp: DateTime<Utc>) -> Result<u64>;

    /// Most recent fill/reference price for a symbol
    fn quote(&self, symbol: &str) -> Decimal;
}

/// Boxed venue for dynamic dispatch
pub type BoxedVenue = Box<dyn ExecutionVenue>;

/// Pluggable option-pricing strategy
///
/// The backtest carries no real option-pricing model, so the default
/// implementation quotes a fixed premium. A real pricing model can be
/// swapped in here without touching the strategy state machine.
pub trait PricingModel: Send + Sync {
    /// Price of the option instrument identified by `symbol`
    fn price(&self, symbol: &str) -> Decimal;
}

/// Fixed-price execution model
///
/// Quotes every instrument at one constant premium. This mirrors the
/// original simplification of the backtest (quote always 20) and is kept
/// deliberately: without historical option chains there is nothing better
/// to mark against.
#[derive(Debug, Clone)]
pub struct FixedPriceModel {
    price: Decimal,
}

impl FixedPriceModel {
    pub fn new(price: Decimal) -> Self {
        Self { price }
    }
}

impl Default for FixedPriceModel {
    fn default() -> Self {
        Self { price: dec!(20) }
    }
}

impl PricingModel for FixedPriceModel {
    fn price(&self, _symbol: &str) -> Decimal {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_price_model_quotes_constant() {
        let model = FixedPriceModel::default();
        assert_eq!(model.price("NIFTY24700CE"), dec!(20));
        assert_eq!(model.price("anything"), dec!(20));

        let model = FixedPriceModel::new(dec!(35.5));
        assert_eq!(model.price("NIFTY24300PE"), dec!(35.5));
    }
}
