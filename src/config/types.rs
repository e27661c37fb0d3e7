//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::{BacktestError, Result};
use crate::common::types::Side;

/// Order type forwarded to the execution venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

/// Product type (carry-forward vs intraday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Nrml,
    Mis,
}

/// Main backtest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Starting cash for the simulated portfolio
    #[serde(default = "default_initial_capital")]
    pub initial_capital: Decimal,
    /// Synthetic price feed settings
    #[serde(default)]
    pub data: DataConfig,
    /// Survivor strategy parameters
    pub strategy: SurvivorConfig,
}

fn default_initial_capital() -> Decimal {
    dec!(100000)
}

impl BacktestConfig {
    /// Check numeric sanity once, before any tick is processed
    pub fn validate(&self) -> Result<()> {
        if self.initial_capital <= Decimal::ZERO {
            return Err(BacktestError::Configuration(
                "initial_capital must be positive".to_string(),
            ));
        }
        self.data.validate()?;
        self.strategy.validate()
    }
}

/// Synthetic price feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Horizon of generated history in years
    #[serde(default = "default_years")]
    pub years: u32,
    /// Price the random walk starts from
    #[serde(default = "default_initial_price")]
    pub initial_price: Decimal,
    /// Per-step return bound (uniform, e.g. 0.01 = ±1% per day)
    #[serde(default = "default_daily_volatility")]
    pub daily_volatility: f64,
    /// RNG seed; a fixed seed makes runs reproducible
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            years: default_years(),
            initial_price: default_initial_price(),
            daily_volatility: default_daily_volatility(),
            seed: default_seed(),
        }
    }
}

fn default_years() -> u32 {
    5
}

fn default_initial_price() -> Decimal {
    dec!(24000)
}

fn default_daily_volatility() -> f64 {
    0.01
}

fn default_seed() -> u64 {
    42
}

impl DataConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_price <= Decimal::ZERO {
            return Err(BacktestError::Configuration(
                "data.initial_price must be positive".to_string(),
            ));
        }
        if !self.daily_volatility.is_finite() || self.daily_volatility < 0.0 {
            return Err(BacktestError::Configuration(
                "data.daily_volatility must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Survivor strategy parameters
///
/// Every recognized key is declared here; unknown keys are rejected at
/// deserialization time and missing required keys fail construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurvivorConfig {
    /// Instrument prefix used when deriving option trading symbols
    pub symbol_initials: String,
    /// Underlying index identifier (informational)
    #[serde(default = "default_index_symbol")]
    pub index_symbol: String,
    /// Underlying move (points) that triggers a new PE entry
    pub pe_gap: Decimal,
    /// Underlying move (points) that triggers a new CE entry
    pub ce_gap: Decimal,
    /// Distance (points) below the underlying for a new PE strike
    pub pe_symbol_gap: Decimal,
    /// Distance (points) above the underlying for a new CE strike
    pub ce_symbol_gap: Decimal,
    /// Underlying move (points) that buys back the open PE short
    pub pe_reset_gap: Decimal,
    /// Underlying move (points) that buys back the open CE short
    pub ce_reset_gap: Decimal,
    /// Contracts sold per PE entry
    pub pe_quantity: u32,
    /// Contracts sold per CE entry
    pub ce_quantity: u32,
    /// Skip an entry when the option quote is below this price
    #[serde(default = "default_min_price_to_sell")]
    pub min_price_to_sell: Decimal,
    /// Declared but not yet wired into the control flow; see the reset-gap
    /// flags on the strategy state
    #[serde(default = "default_sell_multiplier_threshold")]
    pub sell_multiplier_threshold: u32,
    /// Exchange identifier forwarded with orders (informational)
    #[serde(default = "default_exchange")]
    pub exchange: String,
    #[serde(default = "default_order_type")]
    pub order_type: OrderType,
    #[serde(default = "default_product_type")]
    pub product_type: ProductType,
    /// Side used for entries; the Survivor strategy sells premium
    #[serde(default = "default_trans_type")]
    pub trans_type: Side,
    /// Reference price both legs start from
    pub start_price: Decimal,
    /// Additive offset applied to the starting PE reference
    #[serde(default)]
    pub pe_start_point: Decimal,
    /// Additive offset applied to the starting CE reference
    #[serde(default)]
    pub ce_start_point: Decimal,
}

fn default_index_symbol() -> String {
    "NSE:NIFTY 50".to_string()
}

fn default_min_price_to_sell() -> Decimal {
    dec!(15)
}

fn default_sell_multiplier_threshold() -> u32 {
    3
}

fn default_exchange() -> String {
    "NFO".to_string()
}

fn default_order_type() -> OrderType {
    OrderType::Market
}

fn default_product_type() -> ProductType {
    ProductType::Nrml
}

fn default_trans_type() -> Side {
    Side::Sell
}

impl SurvivorConfig {
    /// The reference NIFTY weekly parameter set
    pub fn nifty_defaults() -> Self {
        Self {
            symbol_initials: "NIFTY".to_string(),
            index_symbol: default_index_symbol(),
            pe_gap: dec!(25),
            ce_gap: dec!(25),
            pe_symbol_gap: dec!(200),
            ce_symbol_gap: dec!(200),
            pe_reset_gap: dec!(50),
            ce_reset_gap: dec!(50),
            pe_quantity: 50,
            ce_quantity: 50,
            min_price_to_sell: default_min_price_to_sell(),
            sell_multiplier_threshold: default_sell_multiplier_threshold(),
            exchange: default_exchange(),
            order_type: default_order_type(),
            product_type: default_product_type(),
            trans_type: default_trans_type(),
            start_price: dec!(24500),
            pe_start_point: Decimal::ZERO,
            ce_start_point: Decimal::ZERO,
        }
    }

    /// Check numeric sanity; called once at strategy construction
    pub fn validate(&self) -> Result<()> {
        if self.symbol_initials.is_empty() {
            return Err(BacktestError::Configuration(
                "symbol_initials must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("pe_gap", self.pe_gap),
            ("ce_gap", self.ce_gap),
            ("pe_symbol_gap", self.pe_symbol_gap),
            ("ce_symbol_gap", self.ce_symbol_gap),
            ("pe_reset_gap", self.pe_reset_gap),
            ("ce_reset_gap", self.ce_reset_gap),
            ("start_price", self.start_price),
        ] {
            if value <= Decimal::ZERO {
                return Err(BacktestError::Configuration(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.pe_quantity == 0 || self.ce_quantity == 0 {
            return Err(BacktestError::Configuration(
                "pe_quantity and ce_quantity must be positive".to_string(),
            ));
        }
        if self.min_price_to_sell < Decimal::ZERO {
            return Err(BacktestError::Configuration(
                "min_price_to_sell must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
