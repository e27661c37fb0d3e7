//! Survivor Backtest Library
//!
//! A Rust backtesting engine for the Survivor options-selling strategy:
//! a simulated broker, a two-leg strategy state machine, a sequential
//! simulation driver, and performance reporting.

pub mod broker;
pub mod common;
pub mod config;
pub mod data;
pub mod engine;
pub mod strategy;

// Re-export commonly used types
pub use broker::{ExecutionVenue, FixedPriceModel, PricingModel, SimBroker};
pub use common::errors::{BacktestError, Result};
pub use common::types::{
    EquityPoint, Fill, History, OptionType, OrderIntent, Position, RejectedOrder, Side, Tick,
};
pub use config::{load_config, BacktestConfig, DataConfig, SurvivorConfig};
pub use data::{generate_random_walk, generate_random_walk_between};
pub use engine::{run_backtest, summarize, BacktestRun, Summary};
pub use strategy::{BoxedStrategy, LegState, Strategy, StrikeSelection, SurvivorStrategy};
