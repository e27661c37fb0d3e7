//! Performance reporting
//!
//! Derives summary statistics from a recorded equity curve. The summary is
//! returned by value; rendering (text, JSON, chart) is the caller's concern.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::common::errors::{BacktestError, Result};
use crate::common::types::History;

/// Aggregate performance of one backtest run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub initial_capital: Decimal,
    pub final_value: Decimal,
    pub total_return_pct: Decimal,
}

/// Summarize a recorded history against the starting capital
///
/// Defined only for a non-empty history: an empty run is a distinct
/// "no data" condition (`EmptyHistory`), never a fabricated 0% return.
pub fn summarize(history: &History, initial_capital: Decimal) -> Result<Summary> {
    let last = history.last().ok_or(BacktestError::EmptyHistory)?;

    let final_value = last.portfolio_value;
    let total_return_pct = (final_value / initial_capital - Decimal::ONE) * dec!(100);

    Ok(Summary {
        initial_capital,
        final_value,
        total_return_pct,
    })
}

impl Summary {
    /// Plain-text performance report
    pub fn render_text(&self) -> String {
        format!(
            "Backtest Performance Report\n\
             =========================\n\
             Initial Capital: {}\n\
             Final Portfolio Value: {:.2}\n\
             Total Return: {:.2}%",
            self.initial_capital, self.final_value, self.total_return_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::EquityPoint;
    use chrono::{Duration, TimeZone, Utc};

    fn history(values: &[Decimal]) -> History {
        let start = Utc.with_ymd_and_hms(2025, 1, 6, 9, 15, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &portfolio_value)| EquityPoint {
                timestamp: start + Duration::days(i as i64),
                portfolio_value,
            })
            .collect()
    }

    #[test]
    fn test_summarize_uses_last_value() {
        let history = history(&[dec!(100000), dec!(102000), dec!(105000)]);
        let summary = summarize(&history, dec!(100000)).unwrap();

        assert_eq!(summary.final_value, dec!(105000));
        assert_eq!(summary.total_return_pct, dec!(5.00));
    }

    #[test]
    fn test_summarize_negative_return() {
        let history = history(&[dec!(90000)]);
        let summary = summarize(&history, dec!(100000)).unwrap();
        assert_eq!(summary.total_return_pct, dec!(-10.00));
    }

    #[test]
    fn test_empty_history_is_no_data_not_zero_return() {
        let err = summarize(&Vec::new(), dec!(100000)).unwrap_err();
        assert!(matches!(err, BacktestError::EmptyHistory));
    }

    #[test]
    fn test_render_text_contains_fields() {
        let history = history(&[dec!(101000)]);
        let summary = summarize(&history, dec!(100000)).unwrap();
        let text = summary.render_text();
        assert!(text.contains("Initial Capital: 100000"));
        assert!(text.contains("Total Return: 1.00%"));
    }
}
