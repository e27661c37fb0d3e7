//! Simulated broker
//!
//! Owns the portfolio state of one backtest run: cash, the position book,
//! and the fill/rejection logs. All mutation goes through order execution;
//! nothing else touches cash or positions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::venue::{ExecutionVenue, FixedPriceModel, PricingModel};
use crate::common::errors::{BacktestError, Result};
use crate::common::types::{Fill, OrderIntent, Position, RejectedOrder, Side};

/// Simulated broker for a single backtest run
///
/// Invariant: portfolio value == cash + Σ(position.quantity × mark price),
/// and [`mark_to_market`](SimBroker::mark_to_market) computes exactly that.
///
/// No transaction costs or slippage are modeled; orders fill atomically at
/// their stated price.
pub struct SimBroker {
    cash: Decimal,
    positions: HashMap<String, Position>,
    fills: Vec<Fill>,
    rejected: Vec<RejectedOrder>,
    next_order_id: u64,
    pricing: Box<dyn PricingModel>,
}

impl SimBroker {
    /// Create a broker with the default fixed-price execution model
    pub fn new(initial_capital: Decimal) -> Self {
        Self::with_pricing(initial_capital, Box::new(FixedPriceModel::default()))
    }

    /// Create a broker with a custom pricing model
    pub fn with_pricing(initial_capital: Decimal, pricing: Box<dyn PricingModel>) -> Self {
        Self {
            cash: initial_capital,
            positions: HashMap::new(),
            fills: Vec::new(),
            rejected: Vec::new(),
            next_order_id: 1,
            pricing,
        }
    }

    /// Current cash balance
    pub fn cash(&self) -> Decimal {
        self.cash
    }

    /// Position for a symbol, if one was ever opened
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// The full position book
    pub fn positions(&self) -> &HashMap<String, Position> {
        &self.positions
    }

    /// Append-only log of executed fills
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Orders dropped for being malformed, kept for inspection
    pub fn rejected(&self) -> &[RejectedOrder] {
        &self.rejected
    }

    /// Portfolio value at the given reference price
    ///
    /// Every position is marked at the single reference price. Without an
    /// option-pricing model there is no per-instrument mark; the caller
    /// chooses the reference (the driver passes the underlying tick price).
    pub fn mark_to_market(&self, reference_price: Decimal) -> Decimal {
        let mut value = self.cash;
        for position in self.positions.values() {
            value += Decimal::from(position.quantity) * reference_price;
        }
        value
    }

    fn validate_intent(intent: &OrderIntent) -> Result<()> {
        if intent.quantity == 0 {
            return Err(BacktestError::InvalidOrder(format!(
                "quantity must be positive for {}",
                intent.symbol
            )));
        }
        if intent.price <= Decimal::ZERO {
            return Err(BacktestError::InvalidOrder(format!(
                "price must be positive for {}, got {}",
                intent.symbol, intent.price
            )));
        }
        Ok(())
    }
}

impl ExecutionVenue for SimBroker {
    fn place_order(&mut self, intent: &OrderIntent, timestamp: DateTime<Utc>) -> Result<u64> {
        if let Err(e) = Self::validate_intent(intent) {
            warn!(symbol = %intent.symbol, reason = %e, "dropping malformed order");
            self.rejected.push(RejectedOrder {
                intent: intent.clone(),
                reason: e.to_string(),
                timestamp,
            });
            return Err(e);
        }

        let notional = Decimal::from(intent.quantity) * intent.price;
        match intent.side {
            Side::Buy => self.cash -= notional,
            Side::Sell => self.cash += notional,
        }

        self.positions
            .entry(intent.symbol.clone())
            .or_default()
            .apply(intent.quantity, intent.side);

        let order_id = self.next_order_id;
        self.next_order_id += 1;

        info!(
            order_id,
            side = %intent.side,
            quantity = intent.quantity,
            symbol = %intent.symbol,
            price = %intent.price,
            "placed order"
        );

        self.fills.push(Fill {
            order_id,
            symbol: intent.symbol.clone(),
            quantity: intent.quantity,
            price: intent.price,
            side: intent.side,
            timestamp,
        });

        Ok(order_id)
    }

    fn quote(&self, symbol: &str) -> Decimal {
        self.pricing.price(symbol)
    }
}
