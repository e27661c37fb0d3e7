//! Simulation driver and reporting

mod driver;
mod report;

pub use driver::{run_backtest, BacktestRun};
pub use report::{summarize, Summary};
