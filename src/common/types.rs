//! Unified types used across the broker, strategy, and engine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Option leg type: call (CE) or put (PE)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Ce,
    Pe,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Ce => write!(f, "CE"),
            OptionType::Pe => write!(f, "PE"),
        }
    }
}

/// A single timestamped observation of the underlying price
///
/// The feed contract: timestamps strictly increasing within a run,
/// prices positive finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

impl Tick {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }

    /// Whether the price satisfies the feed contract
    pub fn is_valid(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

/// A transient order intent, consumed immediately by the execution venue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntent {
    pub symbol: String,
    /// Contract count; must be positive
    pub quantity: u32,
    pub side: Side,
    /// Fill price for the simulated execution
    pub price: Decimal,
}

impl OrderIntent {
    pub fn new(symbol: impl Into<String>, quantity: u32, side: Side, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            side,
            price,
        }
    }
}

/// Record of an executed order, appended to the broker's fill log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub order_id: u64,
    pub symbol: String,
    pub quantity: u32,
    pub price: Decimal,
    pub side: Side,
    pub timestamp: DateTime<Utc>,
}

/// A rejected order intent, kept so the caller can inspect dropped orders
#[derive(Debug, Clone)]
pub struct RejectedOrder {
    pub intent: OrderIntent,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// Position in a single instrument
///
/// Positive = long, negative = short. Created on the first fill referencing
/// the symbol and updated additively; a quantity of 0 is a valid, inert entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub quantity: i64,
}

impl Position {
    /// Apply a fill: SELL decreases the signed quantity, BUY increases it
    pub fn apply(&mut self, quantity: u32, side: Side) {
        let delta = i64::from(quantity);
        match side {
            Side::Buy => self.quantity += delta,
            Side::Sell => self.quantity -= delta,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.quantity == 0
    }
}

/// One entry of the portfolio-value history (append-only, one per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub portfolio_value: Decimal,
}

/// Ordered portfolio-value series produced by the simulation driver
pub type History = Vec<EquityPoint>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_apply_sell_then_buy_round_trip() {
        let mut position = Position::default();
        position.apply(50, Side::Sell);
        assert_eq!(position.quantity, -50);
        position.apply(50, Side::Buy);
        assert_eq!(position.quantity, 0);
        assert!(position.is_flat());
    }

    #[test]
    fn test_tick_validity() {
        let now = chrono::Utc::now();
        assert!(Tick::new(now, dec!(24500)).is_valid());
        assert!(!Tick::new(now, dec!(0)).is_valid());
        assert!(!Tick::new(now, dec!(-1)).is_valid());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Buy.to_string(), "BUY");
        assert_eq!(Side::Sell.to_string(), "SELL");
        assert_eq!(OptionType::Ce.to_string(), "CE");
        assert_eq!(OptionType::Pe.to_string(), "PE");
    }
}
